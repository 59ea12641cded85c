use crate::paint::Color;

use super::ImageError;

/// Row-major buffer of straight-alpha colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Wraps `pixels`, which must hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self { width, height, pixels: vec![color; width as usize * height as usize] }
    }

    /// Builds a buffer from tightly packed straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if rgba.len() != expected * 4 {
            return Err(ImageError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: rgba.len() / 4,
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| Color::from_rgba([p[0], p[1], p[2], p[3]]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// Tightly packed straight-alpha RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

/// Row-major buffer of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPixels {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl IndexedPixels {
    pub fn new(width: u32, height: u32, indices: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(ImageError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: indices.len(),
            });
        }
        Ok(Self { width, height, indices })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Resolves every index through `palette`.
    pub fn expand(&self, palette: &[Color]) -> Result<PixelBuffer, ImageError> {
        let pixels = self
            .indices
            .iter()
            .map(|&index| {
                palette
                    .get(index as usize)
                    .copied()
                    .ok_or(ImageError::PaletteIndexOutOfRange { index, len: palette.len() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        PixelBuffer::new(self.width, self.height, pixels)
    }
}
