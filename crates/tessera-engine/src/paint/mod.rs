//! Paint model shared between the scene graph and the rasterizer.
//!
//! Scope:
//! - color representation (straight-alpha ARGB bytes + sentinels)
//! - native solid brushes
//! - stroke attributes (joins, dashes, edge mode)
//!
//! Geometry types remain in `coords`.

pub mod brush;
pub mod color;
pub mod stroke;

pub use brush::{Brush, SolidBrush};
pub use color::Color;
pub use stroke::{DashStyle, EdgeMode, LineJoin};
