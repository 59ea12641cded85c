use crate::paint::Brush;
use crate::scene::{Geometry, NodeKind, SceneNode};

use super::StrokeStyle;

/// Multi-figure geometry sharing one fill and one outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub geometry: Geometry,
    pub fill: Option<Brush>,
    pub stroke: Option<StrokeStyle>,
}

impl SceneNode {
    #[inline]
    pub fn path(geometry: Geometry, fill: Option<Brush>, stroke: Option<StrokeStyle>) -> Self {
        Self::new(NodeKind::Path(PathShape { geometry, fill, stroke }))
    }
}
