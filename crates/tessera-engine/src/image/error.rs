use super::ImageFormat;

/// Failures of image decode/encode requests.
///
/// These are caller or content errors and are always surfaced; they are never
/// recovered into a default image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image content is not in a recognized format")]
    UnknownFormat,

    #[error("{0} images are not supported")]
    Unsupported(ImageFormat),

    #[error("{options} encoder options cannot be used to encode {format} images")]
    EncoderOptionsMismatch { format: ImageFormat, options: &'static str },

    #[error("pixel buffer of {width}x{height} needs {expected} entries, got {actual}")]
    InvalidPixelBuffer { width: u32, height: u32, expected: usize, actual: usize },

    #[error("palette index {index} is out of range for a palette of {len} colors")]
    PaletteIndexOutOfRange { index: u8, len: usize },

    #[error(transparent)]
    Codec(#[from] ::image::ImageError),

    #[error("png decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("png encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
