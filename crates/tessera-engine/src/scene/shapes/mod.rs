pub(crate) mod ellipse;
pub(crate) mod image;
pub(crate) mod path;
pub(crate) mod polygon;
pub(crate) mod polyline;
pub(crate) mod rectangle;
pub(crate) mod text;

pub use ellipse::EllipseShape;
pub use image::ImageShape;
pub use path::PathShape;
pub use polygon::PolygonShape;
pub use polyline::PolylineShape;
pub use rectangle::RectangleShape;
pub use text::TextShape;

use crate::paint::{Brush, DashStyle, LineJoin};

/// Outline drawn along a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub brush: Brush,
    pub thickness: f32,
    pub dash: Option<DashStyle>,
    pub line_join: LineJoin,
}

impl StrokeStyle {
    #[inline]
    pub fn new(brush: Brush, thickness: f32) -> Self {
        Self { brush, thickness, dash: None, line_join: LineJoin::Miter }
    }

    #[inline]
    pub fn with_dash(mut self, dash: Option<DashStyle>) -> Self {
        self.dash = dash;
        self
    }

    #[inline]
    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }
}
