use resvg::tiny_skia::{self, FillRule, Mask, PathBuilder, Pixmap, PixmapPaint};

use crate::coords::{Affine, Rect, ScreenPoint};
use crate::image::PixelBuffer;
use crate::paint::{Color, EdgeMode};
use crate::scene::shapes::{ImageShape, StrokeStyle, TextShape};
use crate::scene::{ClipGeometry, NodeKind, SceneGraph, SceneNode};
use crate::text::FontSystem;

use super::convert;
use super::text::draw_text;

/// Error returned by [`Rasterizer::render`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} raster target")]
    InvalidSize { width: u32, height: u32 },
}

/// Paints scene graphs into an RGBA pixel buffer.
///
/// Scene units are scaled by `scale` device pixels each (1.0 = 96 DPI).
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    scale: f32,
    background: Color,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, scale: 1.0, background: Color::TRANSPARENT }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = if scale > 0.0 && scale.is_finite() { scale } else { 1.0 };
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Paints every node of `graph` in order.
    pub fn render(&self, graph: &SceneGraph, fonts: &FontSystem) -> Result<PixelBuffer, RasterError> {
        let mut pixmap = Pixmap::new(self.width, self.height)
            .ok_or(RasterError::InvalidSize { width: self.width, height: self.height })?;
        if self.background.is_visible() {
            pixmap.fill(convert::color(self.background));
        }

        let mut painter = Painter {
            pixmap: &mut pixmap,
            fonts,
            scale: Affine::scale(self.scale, self.scale),
        };
        for node in graph.iter() {
            painter.draw(node);
        }

        log::debug!("rasterized {} nodes into {}x{}", graph.len(), self.width, self.height);
        Ok(convert::buffer_from_pixmap(&pixmap))
    }
}

// ── painter ───────────────────────────────────────────────────────────────

pub(super) struct Painter<'a> {
    pub(super) pixmap: &'a mut Pixmap,
    pub(super) fonts: &'a FontSystem,
    scale: Affine,
}

impl Painter<'_> {
    fn draw(&mut self, node: &SceneNode) {
        let local = node.local_transform().then(self.scale);
        let mask = node.clip.as_ref().and_then(|clip| self.clip_mask(clip, local, node.edge_mode));
        if node.clip.is_some() && mask.is_none() {
            log::trace!("{} clipped away", node.kind.name());
            return;
        }
        let mask = mask.as_ref();
        let ts = convert::transform(local);

        match &node.kind {
            NodeKind::Polyline(shape) => {
                if let Some(path) = figure_path(&shape.points, false) {
                    self.stroke(&path, &shape.stroke, node.edge_mode, ts, mask);
                }
            }
            NodeKind::Polygon(shape) => {
                if let Some(path) = figure_path(&shape.points, true) {
                    self.fill_and_stroke(
                        &path,
                        shape.fill.as_ref().map(|b| b.color()),
                        shape.stroke.as_ref(),
                        node.edge_mode,
                        ts,
                        mask,
                    );
                }
            }
            NodeKind::Path(shape) => {
                // Figures paint one after another, each filled on its own.
                for figure in shape.geometry.figures() {
                    let Some(path) = figure_path(&figure.points, figure.closed) else {
                        continue;
                    };
                    let fill = shape.fill.as_ref().filter(|_| figure.filled).map(|b| b.color());
                    let stroke = shape.stroke.as_ref();
                    self.fill_and_stroke(&path, fill, stroke, node.edge_mode, ts, mask);
                }
            }
            NodeKind::Ellipse(shape) => {
                let path = sk_rect(Rect::from_origin_size(ScreenPoint::zero(), shape.size))
                    .and_then(PathBuilder::from_oval);
                if let Some(path) = path {
                    self.fill_and_stroke(
                        &path,
                        shape.fill.as_ref().map(|b| b.color()),
                        shape.stroke.as_ref(),
                        node.edge_mode,
                        ts,
                        mask,
                    );
                }
            }
            NodeKind::Rectangle(shape) => {
                if let Some(rect) = sk_rect(Rect::from_origin_size(ScreenPoint::zero(), shape.size)) {
                    let path = PathBuilder::from_rect(rect);
                    self.fill_and_stroke(
                        &path,
                        shape.fill.as_ref().map(|b| b.color()),
                        shape.stroke.as_ref(),
                        node.edge_mode,
                        ts,
                        mask,
                    );
                }
            }
            NodeKind::Text(shape) => self.text(shape, local, mask),
            NodeKind::Image(shape) => self.image(shape, ts, mask),
        }
    }

    fn clip_mask(&self, clip: &ClipGeometry, local: Affine, edge_mode: EdgeMode) -> Option<Mask> {
        let path = PathBuilder::from_rect(sk_rect(clip.rect)?);
        let to_canvas = clip.transform.unwrap_or_default().then(local);
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
        let anti_alias = edge_mode == EdgeMode::Smooth;
        mask.fill_path(&path, FillRule::Winding, anti_alias, convert::transform(to_canvas));
        Some(mask)
    }

    fn fill_and_stroke(
        &mut self,
        path: &tiny_skia::Path,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
        edge_mode: EdgeMode,
        ts: tiny_skia::Transform,
        mask: Option<&Mask>,
    ) {
        if let Some(fill) = fill {
            self.fill(path, fill, edge_mode, ts, mask);
        }
        if let Some(stroke) = stroke {
            self.stroke(path, stroke, edge_mode, ts, mask);
        }
    }

    fn fill(
        &mut self,
        path: &tiny_skia::Path,
        fill: Color,
        edge_mode: EdgeMode,
        ts: tiny_skia::Transform,
        mask: Option<&Mask>,
    ) {
        let paint = convert::solid_paint(fill, edge_mode);
        self.pixmap.fill_path(path, &paint, FillRule::EvenOdd, ts, mask);
    }

    fn stroke(
        &mut self,
        path: &tiny_skia::Path,
        style: &StrokeStyle,
        edge_mode: EdgeMode,
        ts: tiny_skia::Transform,
        mask: Option<&Mask>,
    ) {
        if style.thickness <= 0.0 {
            return;
        }
        let paint = convert::solid_paint(style.brush.color(), edge_mode);
        self.pixmap.stroke_path(path, &paint, &convert::stroke(style), ts, mask);
    }

    fn text(&mut self, shape: &TextShape, local: Affine, mask: Option<&Mask>) {
        let ts = convert::transform(local);
        let Some(max) = shape.max_size else {
            draw_text(self, shape, ts, mask);
            return;
        };
        // Truncation to the maximum size is one more clip rectangle in local space.
        let Some(bounds) = sk_rect(Rect::from_origin_size(ScreenPoint::zero(), max)) else {
            return;
        };
        let truncated = self.narrow_mask(mask, bounds, ts);
        draw_text(self, shape, ts, truncated.as_ref());
    }

    /// Draws the bitmap, or its crop rectangle, stretched over the node size.
    ///
    /// A crop keeps fractional source coordinates: the whole bitmap is mapped
    /// so that the crop lands on the node, and a mask hides the rest.
    fn image(&mut self, shape: &ImageShape, ts: tiny_skia::Transform, mask: Option<&Mask>) {
        let Some(source) = convert::pixmap_from_buffer(shape.bitmap.pixels()) else {
            return;
        };
        let src = shape.crop.unwrap_or_else(|| {
            Rect::new(0.0, 0.0, source.width() as f32, source.height() as f32)
        });
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return;
        }
        let ts = ts
            .pre_scale(shape.size.width / src.width(), shape.size.height / src.height())
            .pre_translate(-src.left(), -src.top());

        let cropped;
        let mask = match shape.crop.and_then(sk_rect) {
            Some(crop) => {
                cropped = self.narrow_mask(mask, crop, ts);
                cropped.as_ref()
            }
            None => mask,
        };

        let paint = PixmapPaint {
            opacity: shape.opacity.clamp(0.0, 1.0),
            quality: if shape.interpolate {
                tiny_skia::FilterQuality::Bilinear
            } else {
                tiny_skia::FilterQuality::Nearest
            },
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, ts, mask);
    }

    /// `mask` (or the whole target) intersected with `rect` placed by `ts`.
    fn narrow_mask(
        &self,
        mask: Option<&Mask>,
        rect: tiny_skia::Rect,
        ts: tiny_skia::Transform,
    ) -> Option<Mask> {
        let path = PathBuilder::from_rect(rect);
        match mask {
            Some(mask) => {
                let mut mask = mask.clone();
                mask.intersect_path(&path, FillRule::Winding, true, ts);
                Some(mask)
            }
            None => Mask::new(self.pixmap.width(), self.pixmap.height()).map(|mut mask| {
                mask.fill_path(&path, FillRule::Winding, true, ts);
                mask
            }),
        }
    }
}

// ── path helpers ──────────────────────────────────────────────────────────

/// Path through `points`; `None` below two points.
fn figure_path(points: &[ScreenPoint], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn sk_rect(r: Rect) -> Option<tiny_skia::Rect> {
    let r = r.normalized();
    tiny_skia::Rect::from_xywh(r.left(), r.top(), r.width(), r.height())
}
