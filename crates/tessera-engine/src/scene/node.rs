use std::rc::Rc;

use crate::coords::{Affine, Rect, ScreenPoint};
use crate::paint::EdgeMode;

use super::shapes::{
    EllipseShape, ImageShape, PathShape, PolygonShape, PolylineShape, RectangleShape, TextShape,
};

/// Clip attached to a node, expressed in the node's local space.
///
/// `rect` is positioned relative to the node offset. When `transform` is set
/// it maps `rect` into the node's local (pre render-transform) space.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipGeometry {
    pub rect: Rect,
    pub transform: Option<Affine>,
}

impl ClipGeometry {
    #[inline]
    pub fn new(rect: Rect) -> Self {
        Self { rect, transform: None }
    }
}

/// Shape-specific payload of a [`SceneNode`].
///
/// Extending the scene:
/// - add a payload module under `scene::shapes::*`
/// - add a variant here
/// - add a constructor on `SceneNode` inside that shape module
/// - teach `raster` to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Polyline(PolylineShape),
    Polygon(PolygonShape),
    Path(PathShape),
    Ellipse(EllipseShape),
    Rectangle(RectangleShape),
    Text(TextShape),
    Image(ImageShape),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Polyline(_) => "polyline",
            NodeKind::Polygon(_) => "polygon",
            NodeKind::Path(_) => "path",
            NodeKind::Ellipse(_) => "ellipse",
            NodeKind::Rectangle(_) => "rectangle",
            NodeKind::Text(_) => "text",
            NodeKind::Image(_) => "image",
        }
    }
}

/// A drawable in the retained scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    /// Local origin of the node on the canvas.
    pub offset: ScreenPoint,
    pub clip: Option<ClipGeometry>,
    pub tooltip: Option<Rc<str>>,
    pub edge_mode: EdgeMode,
}

impl SceneNode {
    /// A node at the canvas origin with no clip, tooltip or aliasing.
    #[inline]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            offset: ScreenPoint::zero(),
            clip: None,
            tooltip: None,
            edge_mode: EdgeMode::Smooth,
        }
    }

    #[inline]
    pub fn at(mut self, offset: ScreenPoint) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    /// Local-to-canvas transform: the node's render transform followed by its offset.
    pub fn local_transform(&self) -> Affine {
        let render = match &self.kind {
            NodeKind::Text(text) => text.transform,
            _ => Affine::identity(),
        };
        render.then(Affine::translate(self.offset.x, self.offset.y))
    }
}
