use std::collections::{HashMap, HashSet};

use tessera_engine::image::{ChartImage, ImageError, ImageId};
use tessera_engine::paint::{Brush, Color};
use tessera_engine::scene::{BitmapRef, Canvas};

/// Native resources keyed by the values they were built from.
///
/// - brushes: one per visible color, kept for the lifetime of the cache
/// - bitmaps: one per image identity, mark-and-sweep per frame
///
/// Every bitmap lookup marks the image as used; [`sweep`](Self::sweep) drops
/// the bitmaps that were not looked up since the previous sweep.
#[derive(Debug, Default)]
pub struct ResourceCache {
    brushes: HashMap<Color, Brush>,
    bitmaps: HashMap<ImageId, BitmapRef>,
    used: HashSet<ImageId>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brush for `color`, built through `canvas` on first use.
    ///
    /// Invisible colors (alpha 0, including the sentinels) have no brush and
    /// never reach the cache.
    pub fn brush<C: Canvas + ?Sized>(&mut self, canvas: &mut C, color: Color) -> Option<Brush> {
        if color.is_invisible() {
            return None;
        }
        let brush = self.brushes.entry(color).or_insert_with(|| {
            log::trace!("new brush for {color}");
            canvas.create_brush(color)
        });
        Some(Brush::clone(brush))
    }

    /// Bitmap for `image`, decoded through `canvas` on first use, and marks
    /// `image` as used this frame.
    pub fn bitmap<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        image: &ChartImage,
    ) -> Result<BitmapRef, ImageError> {
        let id = image.id();
        self.used.insert(id);
        if let Some(bitmap) = self.bitmaps.get(&id) {
            return Ok(BitmapRef::clone(bitmap));
        }
        let bitmap = canvas.create_bitmap(image)?;
        log::trace!("cached bitmap for {id:?}");
        self.bitmaps.insert(id, BitmapRef::clone(&bitmap));
        Ok(bitmap)
    }

    /// Drops every bitmap not used since the last sweep and starts a new frame.
    ///
    /// Returns the number of bitmaps dropped. Brushes are kept.
    pub fn sweep(&mut self) -> usize {
        let before = self.bitmaps.len();
        let used = &self.used;
        self.bitmaps.retain(|id, _| used.contains(id));
        self.used.clear();
        let dropped = before - self.bitmaps.len();
        if dropped > 0 {
            log::debug!("released {dropped} unused bitmaps, {} kept", self.bitmaps.len());
        }
        dropped
    }

    #[inline]
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    #[inline]
    pub fn bitmap_count(&self) -> usize {
        self.bitmaps.len()
    }

    #[inline]
    pub fn contains_bitmap(&self, id: ImageId) -> bool {
        self.bitmaps.contains_key(&id)
    }
}
