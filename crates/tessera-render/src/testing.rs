//! Test canvas with fixed text metrics.

use std::cell::Cell;
use std::rc::Rc;

use tessera_engine::coords::Size;
use tessera_engine::image::{ChartImage, ImageError};
use tessera_engine::paint::{Brush, Color, SolidBrush};
use tessera_engine::scene::{Bitmap, BitmapRef, Canvas, NodeId, SceneGraph, SceneNode};
use tessera_engine::text::FontSpec;

/// Records appended nodes and construction calls.
///
/// Every character is `0.5 × size` wide and every line `size` high.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    graph: SceneGraph,
    brushes: usize,
    bitmaps: usize,
    measures: Cell<usize>,
}

impl RecordingCanvas {
    pub(crate) fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub(crate) fn brushes_created(&self) -> usize {
        self.brushes
    }

    pub(crate) fn bitmaps_created(&self) -> usize {
        self.bitmaps
    }

    pub(crate) fn measure_calls(&self) -> usize {
        self.measures.get()
    }
}

impl Canvas for RecordingCanvas {
    fn append(&mut self, node: SceneNode) -> NodeId {
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
        self.measures.set(self.measures.get() + 1);
        let size = font.effective_size();
        let widest = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
        let lines = text.split('\n').count();
        Size::new(widest as f32 * size * 0.5, lines as f32 * size)
    }

    fn create_brush(&mut self, color: Color) -> Brush {
        self.brushes += 1;
        Rc::new(SolidBrush::new(color))
    }

    fn create_bitmap(&mut self, image: &ChartImage) -> Result<BitmapRef, ImageError> {
        let pixels = image.get_pixels()?;
        self.bitmaps += 1;
        Ok(Rc::new(Bitmap::new(image.id(), pixels)))
    }
}
