use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::paint::Color;

use super::codecs::{decoder_for, encoder_for};
use super::{EncoderOptions, ImageError, ImageFormat, IndexedPixels, PixelBuffer};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`ChartImage`]. Clones share it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    fn next() -> Self {
        ImageId(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Header metadata, read without decoding pixel data.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub dpi_x: f32,
    pub dpi_y: f32,
}

impl ImageInfo {
    pub const DEFAULT_DPI: f32 = 96.0;
}

/// An encoded raster image used as a drawing source.
///
/// The encoded bytes are the source of truth. Pixels are decoded on every
/// [`get_pixels`](Self::get_pixels) call, except for images built from a
/// pixel buffer with [`create`](Self::create), which keep that buffer.
#[derive(Debug, Clone)]
pub struct ChartImage {
    id: ImageId,
    format: ImageFormat,
    data: Arc<[u8]>,
    info: ImageInfo,
    source_pixels: Option<Arc<PixelBuffer>>,
}

impl ChartImage {
    /// Wraps encoded bytes, sniffing the format and reading header metadata.
    ///
    /// Unknown and JPEG content is accepted with empty metadata; operations
    /// that need a codec fail later. A malformed PNG or BMP header fails here.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, ImageError> {
        let data: Arc<[u8]> = bytes.into();
        let format = ImageFormat::sniff(&data);
        let info = match decoder_for(format) {
            Ok(decoder) => decoder.info(&data)?,
            Err(err) => {
                log::debug!("no metadata for {format} image: {err}");
                ImageInfo::default()
            }
        };
        Ok(Self { id: ImageId::next(), format, data, info, source_pixels: None })
    }

    /// Encodes `pixels` as `format`, keeping the buffer for later
    /// [`get_pixels`](Self::get_pixels) calls.
    pub fn create(
        pixels: PixelBuffer,
        format: ImageFormat,
        options: Option<&EncoderOptions>,
    ) -> Result<Self, ImageError> {
        let mut image = Self::encode(&pixels, format, options)?;
        image.source_pixels = Some(Arc::new(pixels));
        Ok(image)
    }

    /// Encodes a palette-indexed buffer as `format`.
    pub fn create_indexed(
        indices: &IndexedPixels,
        palette: &[Color],
        format: ImageFormat,
        options: Option<&EncoderOptions>,
    ) -> Result<Self, ImageError> {
        let pixels = indices.expand(palette)?;
        Self::encode(&pixels, format, options)
    }

    fn encode(
        pixels: &PixelBuffer,
        format: ImageFormat,
        options: Option<&EncoderOptions>,
    ) -> Result<Self, ImageError> {
        let encoder = encoder_for(format, options).inspect_err(|err| {
            log::warn!("cannot encode {}x{} image: {err}", pixels.width(), pixels.height());
        })?;
        Self::from_bytes(encoder.encode(pixels)?)
    }

    /// Decoded pixels.
    ///
    /// Returns the retained buffer when there is one; otherwise runs the
    /// format's decoder. The decoded result is not memoized.
    pub fn get_pixels(&self) -> Result<Arc<PixelBuffer>, ImageError> {
        if let Some(pixels) = &self.source_pixels {
            return Ok(Arc::clone(pixels));
        }
        let decoder = decoder_for(self.format).inspect_err(|err| {
            log::warn!("cannot decode image {:?}: {err}", self.id);
        })?;
        Ok(Arc::new(decoder.decode(&self.data)?))
    }

    #[inline]
    pub fn id(&self) -> ImageId {
        self.id
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The encoded bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn info(&self) -> ImageInfo {
        self.info
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> u16 {
        self.info.bits_per_pixel
    }

    #[inline]
    pub fn dpi_x(&self) -> f32 {
        self.info.dpi_x
    }

    #[inline]
    pub fn dpi_y(&self) -> f32 {
        self.info.dpi_y
    }

    /// The buffer this image was created from, if it was built by [`create`](Self::create).
    #[inline]
    pub fn source_pixels(&self) -> Option<&PixelBuffer> {
        self.source_pixels.as_deref()
    }
}

impl PartialEq for ChartImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChartImage {}

impl Hash for ChartImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{BmpEncoderOptions, PngEncoderOptions};

    fn checker() -> PixelBuffer {
        let mut buf = PixelBuffer::filled(4, 4, Color::WHITE);
        for y in 0..4 {
            for x in 0..4 {
                if (x + y) % 2 == 0 {
                    buf.set(x, y, Color::from_rgb(20, 40, 200));
                }
            }
        }
        buf
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_bytes_unknown_is_accepted_but_does_not_decode() {
        let image = ChartImage::from_bytes(vec![0u8, 0]).unwrap();
        assert_eq!(image.format(), ImageFormat::Unknown);
        assert_eq!(image.info(), ImageInfo::default());
        assert!(matches!(image.get_pixels(), Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn jpeg_is_recognized_but_unsupported() {
        let image = ChartImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
        assert!(matches!(image.get_pixels(), Err(ImageError::Unsupported(ImageFormat::Jpeg))));
        let err = ChartImage::create(checker(), ImageFormat::Jpeg, None).unwrap_err();
        assert!(matches!(err, ImageError::Unsupported(ImageFormat::Jpeg)));
    }

    #[test]
    fn malformed_png_header_fails_at_construction() {
        assert!(ChartImage::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0, 0]).is_err());
    }

    #[test]
    fn create_reads_metadata_eagerly() {
        let opts = EncoderOptions::from(PngEncoderOptions { dpi_x: 192.0, dpi_y: 192.0 });
        let image = ChartImage::create(checker(), ImageFormat::Png, Some(&opts)).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!((image.width(), image.height()), (4, 4));
        assert!((image.dpi_x() - 192.0).abs() < 0.05);
        assert_eq!(ImageFormat::sniff(image.data()), ImageFormat::Png);
    }

    #[test]
    fn create_rejects_mismatched_options() {
        let opts = EncoderOptions::from(BmpEncoderOptions::default());
        let err = ChartImage::create(checker(), ImageFormat::Png, Some(&opts)).unwrap_err();
        assert!(matches!(err, ImageError::EncoderOptionsMismatch { .. }));
    }

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn create_keeps_source_pixels() {
        let image = ChartImage::create(checker(), ImageFormat::Bmp, None).unwrap();
        let first = image.get_pixels().unwrap();
        let second = image.get_pixels().unwrap();
        assert_eq!(*first, checker());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn from_bytes_decodes_every_call() {
        let encoded = ChartImage::create(checker(), ImageFormat::Png, None).unwrap();
        let image = ChartImage::from_bytes(encoded.data().to_vec()).unwrap();
        assert!(image.source_pixels().is_none());
        let first = image.get_pixels().unwrap();
        let second = image.get_pixels().unwrap();
        assert_eq!(*first, checker());
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn create_indexed_expands_palette() {
        let indices = IndexedPixels::new(2, 2, vec![0, 1, 1, 0]).unwrap();
        let palette = [Color::BLACK, Color::WHITE];
        let image = ChartImage::create_indexed(&indices, &palette, ImageFormat::Png, None).unwrap();
        assert!(image.source_pixels().is_none());
        let pixels = image.get_pixels().unwrap();
        assert_eq!(pixels.get(1, 0), Some(Color::WHITE));
        assert_eq!(pixels.get(1, 1), Some(Color::BLACK));
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn identity_is_per_instance_not_content() {
        let a = ChartImage::from_bytes(vec![1u8, 2, 3]).unwrap();
        let b = ChartImage::from_bytes(vec![1u8, 2, 3]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
        assert_eq!(a.clone().id(), a.id());
    }
}
