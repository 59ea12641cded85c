//! tessera engine crate.
//!
//! This crate owns the drawing surface the chart render context targets: the
//! retained scene graph, fonts, raster images and the offscreen rasterizer.

pub mod coords;
pub mod image;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod text;
