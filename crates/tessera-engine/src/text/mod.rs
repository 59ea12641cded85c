//! Font loading, lookup and text measurement.

mod font;
mod font_system;

pub use font::{FontSpec, FontWeight};
pub use font_system::{FontId, FontLoadError, FontSystem};
