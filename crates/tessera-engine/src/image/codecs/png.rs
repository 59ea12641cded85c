use std::io::Cursor;

use crate::image::{ImageError, ImageFormat, ImageInfo, PixelBuffer, PngEncoderOptions};

use super::{dpi_from_ppm, ppm_from_dpi, ImageDecoder, ImageEncoder};

/// PNG decoder. Header reads stop at the first image data chunk.
#[derive(Debug, Default, Copy, Clone)]
pub struct PngDecoder;

impl ImageDecoder for PngDecoder {
    fn info(&self, bytes: &[u8]) -> Result<ImageInfo, ImageError> {
        let reader = png::Decoder::new(Cursor::new(bytes)).read_info()?;
        let info = reader.info();
        // Only metre-based pixel dimensions carry a resolution.
        let (dpi_x, dpi_y) = match info.pixel_dims {
            Some(png::PixelDimensions { xppu, yppu, unit: png::Unit::Meter }) => {
                (dpi_from_ppm(xppu), dpi_from_ppm(yppu))
            }
            _ => (ImageInfo::DEFAULT_DPI, ImageInfo::DEFAULT_DPI),
        };
        Ok(ImageInfo {
            width: info.width,
            height: info.height,
            bits_per_pixel: info.bits_per_pixel() as u16,
            dpi_x,
            dpi_y,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
        let rgba = ::image::load_from_memory_with_format(bytes, ::image::ImageFormat::Png)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::from_rgba8(width, height, rgba.as_raw())
    }
}

/// PNG encoder writing 8-bit RGBA with the resolution in a `pHYs` chunk.
#[derive(Debug, Default, Copy, Clone)]
pub struct PngEncoder {
    options: PngEncoderOptions,
}

impl PngEncoder {
    pub fn new(options: PngEncoderOptions) -> Self {
        Self { options }
    }
}

impl ImageEncoder for PngEncoder {
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, ImageError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, pixels.width(), pixels.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm_from_dpi(self.options.dpi_x),
                yppu: ppm_from_dpi(self.options.dpi_y),
                unit: png::Unit::Meter,
            }));
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&pixels.to_rgba8())?;
            writer.finish()?;
        }
        log::trace!(
            "encoded {}x{} {} ({} bytes)",
            pixels.width(),
            pixels.height(),
            ImageFormat::Png,
            out.len()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn sample() -> PixelBuffer {
        let mut buf = PixelBuffer::filled(3, 2, Color::WHITE);
        buf.set(0, 0, Color::from_argb(255, 200, 10, 20));
        buf.set(2, 1, Color::from_argb(64, 1, 2, 3));
        buf
    }

    #[test]
    fn encode_then_decode_preserves_pixels() {
        let bytes = PngEncoder::default().encode(&sample()).unwrap();
        assert_eq!(ImageFormat::sniff(&bytes), ImageFormat::Png);
        assert_eq!(PngDecoder.decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn info_reads_header_and_resolution() {
        let encoder = PngEncoder::new(PngEncoderOptions { dpi_x: 300.0, dpi_y: 150.0 });
        let bytes = encoder.encode(&sample()).unwrap();
        let info = PngDecoder.info(&bytes).unwrap();
        assert_eq!((info.width, info.height, info.bits_per_pixel), (3, 2, 32));
        assert!((info.dpi_x - 300.0).abs() < 0.05);
        assert!((info.dpi_y - 150.0).abs() < 0.05);
    }

    #[test]
    fn info_defaults_without_resolution_chunk() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 2);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 64, 128, 255]).unwrap();
        }
        let info = PngDecoder.info(&bytes).unwrap();
        assert_eq!(info.bits_per_pixel, 8);
        assert_eq!((info.dpi_x, info.dpi_y), (ImageInfo::DEFAULT_DPI, ImageInfo::DEFAULT_DPI));
    }

    #[test]
    fn truncated_header_fails() {
        assert!(PngDecoder.info(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).is_err());
    }
}
