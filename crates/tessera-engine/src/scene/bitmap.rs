use std::rc::Rc;
use std::sync::Arc;

use crate::image::{ImageId, PixelBuffer};

/// Native bitmap decoded from a [`ChartImage`](crate::image::ChartImage).
#[derive(Debug, PartialEq)]
pub struct Bitmap {
    source: ImageId,
    pixels: Arc<PixelBuffer>,
}

impl Bitmap {
    pub fn new(source: ImageId, pixels: Arc<PixelBuffer>) -> Self {
        Self { source, pixels }
    }

    /// Identity of the image this bitmap was decoded from.
    #[inline]
    pub fn source(&self) -> ImageId {
        self.source
    }

    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Shared handle to a native bitmap.
pub type BitmapRef = Rc<Bitmap>;
