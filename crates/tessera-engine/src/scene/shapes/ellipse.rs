use crate::coords::{Rect, Size};
use crate::paint::Brush;
use crate::scene::{NodeKind, SceneNode};

use super::StrokeStyle;

/// Ellipse inscribed in a box whose top-left is the node offset.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub size: Size,
    pub fill: Option<Brush>,
    pub stroke: Option<StrokeStyle>,
}

impl SceneNode {
    /// Ellipse inscribed in `bounds`; the node offset is the box's top-left.
    #[inline]
    pub fn ellipse(bounds: Rect, fill: Option<Brush>, stroke: Option<StrokeStyle>) -> Self {
        Self::new(NodeKind::Ellipse(EllipseShape { size: bounds.size, fill, stroke }))
            .at(bounds.origin)
    }
}
