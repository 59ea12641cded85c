//! Per-format decoders and encoders.
//!
//! [`decoder_for`] and [`encoder_for`] are the only dispatch points; callers
//! never match on [`ImageFormat`] themselves.

mod bmp;
mod png;

pub use bmp::{BmpDecoder, BmpEncoder};
pub use png::{PngDecoder, PngEncoder};

use super::{EncoderOptions, ImageError, ImageFormat, ImageInfo, PixelBuffer};

/// Metres per inch, for converting pixels-per-metre to DPI.
const METRES_PER_INCH: f32 = 0.0254;

/// Reads header metadata and full pixel data for one format.
pub trait ImageDecoder {
    /// Header metadata only; must not decode pixel data.
    fn info(&self, bytes: &[u8]) -> Result<ImageInfo, ImageError>;

    /// Decodes every pixel to straight-alpha ARGB.
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, ImageError>;
}

/// Writes a pixel buffer in one format.
pub trait ImageEncoder {
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, ImageError>;
}

/// Returns the decoder for `format`.
pub fn decoder_for(format: ImageFormat) -> Result<Box<dyn ImageDecoder>, ImageError> {
    match format {
        ImageFormat::Png => Ok(Box::new(PngDecoder)),
        ImageFormat::Bmp => Ok(Box::new(BmpDecoder)),
        ImageFormat::Jpeg => Err(ImageError::Unsupported(ImageFormat::Jpeg)),
        ImageFormat::Unknown => Err(ImageError::UnknownFormat),
    }
}

/// Returns the encoder for `format`, configured with `options` or the
/// format's defaults.
pub fn encoder_for(
    format: ImageFormat,
    options: Option<&EncoderOptions>,
) -> Result<Box<dyn ImageEncoder>, ImageError> {
    if let Some(options) = options {
        if options.format() != format {
            return Err(ImageError::EncoderOptionsMismatch { format, options: options.name() });
        }
    }
    match (format, options) {
        (ImageFormat::Png, Some(EncoderOptions::Png(o))) => Ok(Box::new(PngEncoder::new(*o))),
        (ImageFormat::Png, _) => Ok(Box::new(PngEncoder::default())),
        (ImageFormat::Bmp, Some(EncoderOptions::Bmp(o))) => Ok(Box::new(BmpEncoder::new(*o))),
        (ImageFormat::Bmp, _) => Ok(Box::new(BmpEncoder::default())),
        (ImageFormat::Jpeg, _) => Err(ImageError::Unsupported(ImageFormat::Jpeg)),
        (ImageFormat::Unknown, _) => Err(ImageError::UnknownFormat),
    }
}

#[inline]
pub(crate) fn dpi_from_ppm(ppm: u32) -> f32 {
    ppm as f32 * METRES_PER_INCH
}

#[inline]
pub(crate) fn ppm_from_dpi(dpi: f32) -> u32 {
    (dpi / METRES_PER_INCH).round().max(0.0) as u32
}
