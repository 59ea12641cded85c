use std::io::Cursor;

use ::image::ImageDecoder as _;
use ::image::ImageEncoder as _;

use crate::image::{BmpEncoderOptions, ImageError, ImageFormat, ImageInfo, PixelBuffer};

use super::{dpi_from_ppm, ppm_from_dpi, ImageDecoder, ImageEncoder};

const DIB_SIZE_OFFSET: usize = 14;
const BPP_OFFSET: usize = 28;
const PPM_X_OFFSET: usize = 38;
const PPM_Y_OFFSET: usize = 42;
/// Smallest DIB header that carries a resolution (BITMAPINFOHEADER).
const INFO_HEADER_LEN: u32 = 40;

/// BMP decoder.
#[derive(Debug, Default, Copy, Clone)]
pub struct BmpDecoder;

impl ImageDecoder for BmpDecoder {
    fn info(&self, bytes: &[u8]) -> Result<ImageInfo, ImageError> {
        let decoder = ::image::codecs::bmp::BmpDecoder::new(Cursor::new(bytes))?;
        let (width, height) = decoder.dimensions();
        let bits_per_pixel = read_u16(bytes, BPP_OFFSET)
            .filter(|bpp| *bpp > 0)
            .unwrap_or_else(|| decoder.color_type().bits_per_pixel());
        let (dpi_x, dpi_y) = read_resolution(bytes);
        Ok(ImageInfo { width, height, bits_per_pixel, dpi_x, dpi_y })
    }

    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
        let rgba = ::image::load_from_memory_with_format(bytes, ::image::ImageFormat::Bmp)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::from_rgba8(width, height, rgba.as_raw())
    }
}

/// BMP encoder writing 32-bit RGBA with the requested resolution.
#[derive(Debug, Default, Copy, Clone)]
pub struct BmpEncoder {
    options: BmpEncoderOptions,
}

impl BmpEncoder {
    pub fn new(options: BmpEncoderOptions) -> Self {
        Self { options }
    }
}

impl ImageEncoder for BmpEncoder {
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, ImageError> {
        let mut out = Vec::new();
        ::image::codecs::bmp::BmpEncoder::new(&mut out).write_image(
            &pixels.to_rgba8(),
            pixels.width(),
            pixels.height(),
            ::image::ExtendedColorType::Rgba8,
        )?;
        if has_resolution(&out) {
            out[PPM_X_OFFSET..PPM_X_OFFSET + 4]
                .copy_from_slice(&ppm_from_dpi(self.options.dpi_x).to_le_bytes());
            out[PPM_Y_OFFSET..PPM_Y_OFFSET + 4]
                .copy_from_slice(&ppm_from_dpi(self.options.dpi_y).to_le_bytes());
        }
        log::trace!(
            "encoded {}x{} {} ({} bytes)",
            pixels.width(),
            pixels.height(),
            ImageFormat::Bmp,
            out.len()
        );
        Ok(out)
    }
}

// ── header helpers ────────────────────────────────────────────────────────

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(bytes.get(at..at + 2)?.try_into().ok()?))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn has_resolution(bytes: &[u8]) -> bool {
    read_u32(bytes, DIB_SIZE_OFFSET).is_some_and(|len| len >= INFO_HEADER_LEN)
        && bytes.len() >= PPM_Y_OFFSET + 4
}

/// Resolution from the info header; zero or missing values read as 96 DPI.
fn read_resolution(bytes: &[u8]) -> (f32, f32) {
    let dpi = |at| {
        read_u32(bytes, at)
            .filter(|ppm| *ppm > 0 && has_resolution(bytes))
            .map_or(ImageInfo::DEFAULT_DPI, dpi_from_ppm)
    };
    (dpi(PPM_X_OFFSET), dpi(PPM_Y_OFFSET))
}
