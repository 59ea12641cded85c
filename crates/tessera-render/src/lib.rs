//! tessera render crate.
//!
//! Turns a stream of stateless chart draw calls into a bounded retained
//! scene. Layers:
//! - [`context`]: the drawing contract chart code talks to
//! - [`batch`]: pure algorithms bounding the node count of long or numerous primitives
//! - [`cache`]: brush and bitmap reuse across frames
//! - [`canvas`]: the backend composing the three on a [`Canvas`](tessera_engine::scene::Canvas)
//! - [`export`]: offscreen PNG export

pub mod batch;
pub mod cache;
pub mod canvas;
pub mod config;
pub mod context;
pub mod export;

#[cfg(test)]
mod testing;

pub use cache::ResourceCache;
pub use canvas::CanvasRenderContext;
pub use config::RenderConfig;
pub use context::{HorizontalAlignment, RenderContext, Stroke, TextStyle, VerticalAlignment};
pub use export::{ExportError, Plot, PngExporter};
