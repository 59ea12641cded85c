use crate::coords::ScreenPoint;
use crate::paint::Brush;
use crate::scene::{NodeKind, SceneNode};

use super::StrokeStyle;

/// Closed polygon with optional fill and outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<ScreenPoint>,
    pub fill: Option<Brush>,
    pub stroke: Option<StrokeStyle>,
}

impl SceneNode {
    #[inline]
    pub fn polygon(points: Vec<ScreenPoint>, fill: Option<Brush>, stroke: Option<StrokeStyle>) -> Self {
        Self::new(NodeKind::Polygon(PolygonShape { points, fill, stroke }))
    }
}
