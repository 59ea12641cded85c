//! Raster images used as drawing sources.
//!
//! Responsibilities:
//! - sniff the container format from magic bytes
//! - read header metadata eagerly, decode pixels lazily
//! - dispatch decode/encode to a per-format codec
//!
//! Byte-level PNG/BMP work is delegated to the `image` crate; this module owns
//! the dispatch contract and the metadata the codecs do not expose.

mod chart_image;
pub mod codecs;
mod error;
mod format;
mod options;
mod pixels;

pub use chart_image::{ChartImage, ImageId, ImageInfo};
pub use error::ImageError;
pub use format::ImageFormat;
pub use options::{BmpEncoderOptions, EncoderOptions, PngEncoderOptions};
pub use pixels::{IndexedPixels, PixelBuffer};
