//! Offscreen rasterizer.
//!
//! Turns a [`SceneGraph`](crate::scene::SceneGraph) into pixels with
//! tiny-skia. Nodes are painted back to front; each node's clip geometry
//! becomes a coverage mask in canvas space.

mod convert;
mod rasterizer;
mod text;

pub use rasterizer::{RasterError, Rasterizer};
