use crate::coords::{Rect, Size};
use crate::paint::Brush;
use crate::scene::{NodeKind, SceneNode};

use super::StrokeStyle;

/// Axis-aligned rectangle whose top-left is the node offset.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    pub size: Size,
    pub fill: Option<Brush>,
    pub stroke: Option<StrokeStyle>,
}

impl SceneNode {
    #[inline]
    pub fn rectangle(bounds: Rect, fill: Option<Brush>, stroke: Option<StrokeStyle>) -> Self {
        Self::new(NodeKind::Rectangle(RectangleShape { size: bounds.size, fill, stroke }))
            .at(bounds.origin)
    }
}
