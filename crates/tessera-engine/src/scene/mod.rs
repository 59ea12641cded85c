//! Retained scene graph.
//!
//! Responsibilities:
//! - store backend-agnostic drawable nodes in painter order
//! - carry per-node state (local offset, clip geometry, tooltip, edge mode)
//! - define the [`Canvas`] capability the render context draws into
//! - keep shape-specific payloads isolated per shape file under `scene::shapes`

mod bitmap;
mod canvas;
mod geometry;
mod graph;
mod node;

pub mod shapes;

pub use bitmap::{Bitmap, BitmapRef};
pub use canvas::{Canvas, CanvasStats, SceneCanvas};
pub use geometry::{Figure, Geometry, GeometryBuilder};
pub use graph::{NodeId, SceneGraph};
pub use node::{ClipGeometry, NodeKind, SceneNode};
