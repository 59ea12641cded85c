use std::rc::Rc;

use crate::coords::Size;
use crate::image::{ChartImage, ImageError};
use crate::paint::{Brush, Color, SolidBrush};
use crate::text::{FontSpec, FontSystem};

use super::{Bitmap, BitmapRef, NodeId, SceneGraph, SceneNode};

/// The native drawing surface a render context targets.
///
/// A canvas owns the retained nodes and the facilities to build them: text
/// measurement and brush/bitmap construction. Implementations need not be
/// thread-safe; a canvas is driven by one render pass at a time.
pub trait Canvas {
    fn append(&mut self, node: SceneNode) -> NodeId;
    fn remove(&mut self, id: NodeId) -> Option<SceneNode>;
    fn clear(&mut self);
    fn node_count(&self) -> usize;

    /// Size of `text` laid out in `font`. Must not mutate the scene.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size;

    fn create_brush(&mut self, color: Color) -> Brush;

    /// Decodes `image` into a native bitmap.
    fn create_bitmap(&mut self, image: &ChartImage) -> Result<BitmapRef, ImageError>;
}

/// Counters kept by [`SceneCanvas`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CanvasStats {
    pub brushes_created: usize,
    pub bitmaps_created: usize,
    pub nodes_appended: usize,
}

/// In-memory canvas over a [`SceneGraph`], measuring text with a [`FontSystem`].
#[derive(Default)]
pub struct SceneCanvas {
    graph: SceneGraph,
    fonts: FontSystem,
    stats: CanvasStats,
}

impl SceneCanvas {
    pub fn new(fonts: FontSystem) -> Self {
        Self { graph: SceneGraph::new(), fonts, stats: CanvasStats::default() }
    }

    #[inline]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[inline]
    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    #[inline]
    pub fn fonts_mut(&mut self) -> &mut FontSystem {
        &mut self.fonts
    }

    #[inline]
    pub fn stats(&self) -> CanvasStats {
        self.stats
    }

    /// Drops the scene and hands the font system back.
    pub fn into_fonts(self) -> FontSystem {
        self.fonts
    }
}

impl Canvas for SceneCanvas {
    fn append(&mut self, node: SceneNode) -> NodeId {
        self.stats.nodes_appended += 1;
        self.graph.append(node)
    }

    fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        self.graph.remove(id)
    }

    fn clear(&mut self) {
        self.graph.clear();
    }

    fn node_count(&self) -> usize {
        self.graph.len()
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Size {
        self.fonts.measure(text, font)
    }

    fn create_brush(&mut self, color: Color) -> Brush {
        self.stats.brushes_created += 1;
        Rc::new(SolidBrush::new(color))
    }

    fn create_bitmap(&mut self, image: &ChartImage) -> Result<BitmapRef, ImageError> {
        let pixels = image.get_pixels()?;
        self.stats.bitmaps_created += 1;
        log::trace!("decoded bitmap {}x{} for {:?}", pixels.width(), pixels.height(), image.id());
        Ok(Rc::new(Bitmap::new(image.id(), pixels)))
    }
}
