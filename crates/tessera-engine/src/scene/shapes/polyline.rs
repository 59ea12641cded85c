use crate::coords::ScreenPoint;
use crate::scene::{NodeKind, SceneNode};

use super::StrokeStyle;

/// Open stroked polyline, points in the node's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    pub points: Vec<ScreenPoint>,
    pub stroke: StrokeStyle,
}

impl SceneNode {
    #[inline]
    pub fn polyline(points: Vec<ScreenPoint>, stroke: StrokeStyle) -> Self {
        Self::new(NodeKind::Polyline(PolylineShape { points, stroke }))
    }
}
