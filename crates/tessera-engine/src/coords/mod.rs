//! Coordinate and geometry types shared by the scene graph, the rasterizer and
//! the render context.
//!
//! Canonical space:
//! - device-independent units (1/96 inch)
//! - origin top-left
//! - +X right, +Y down

mod affine;
mod point;
mod rect;
mod size;

pub use affine::Affine;
pub use point::ScreenPoint;
pub use rect::Rect;
pub use size::Size;
