use super::ImageFormat;

const DEFAULT_DPI: f32 = 96.0;

/// Options for the PNG encoder.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PngEncoderOptions {
    pub dpi_x: f32,
    pub dpi_y: f32,
}

impl Default for PngEncoderOptions {
    fn default() -> Self {
        Self { dpi_x: DEFAULT_DPI, dpi_y: DEFAULT_DPI }
    }
}

/// Options for the BMP encoder.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BmpEncoderOptions {
    pub dpi_x: f32,
    pub dpi_y: f32,
}

impl Default for BmpEncoderOptions {
    fn default() -> Self {
        Self { dpi_x: DEFAULT_DPI, dpi_y: DEFAULT_DPI }
    }
}

/// Format-specific encoder options.
///
/// Passing options of one format to the encoder of another is a programming
/// error and fails with [`ImageError::EncoderOptionsMismatch`](super::ImageError).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EncoderOptions {
    Png(PngEncoderOptions),
    Bmp(BmpEncoderOptions),
}

impl EncoderOptions {
    /// The format these options belong to.
    pub fn format(&self) -> ImageFormat {
        match self {
            EncoderOptions::Png(_) => ImageFormat::Png,
            EncoderOptions::Bmp(_) => ImageFormat::Bmp,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            EncoderOptions::Png(_) => "PNG",
            EncoderOptions::Bmp(_) => "BMP",
        }
    }
}

impl From<PngEncoderOptions> for EncoderOptions {
    fn from(o: PngEncoderOptions) -> Self {
        EncoderOptions::Png(o)
    }
}

impl From<BmpEncoderOptions> for EncoderOptions {
    fn from(o: BmpEncoderOptions) -> Self {
        EncoderOptions::Bmp(o)
    }
}
