use std::rc::Rc;

use tessera_engine::coords::{Affine, Rect, ScreenPoint, Size};
use tessera_engine::image::{ChartImage, ImageError};
use tessera_engine::paint::{Brush, Color, DashStyle, EdgeMode};
use tessera_engine::scene::shapes::StrokeStyle;
use tessera_engine::scene::{Canvas, ClipGeometry, Figure, NodeId, NodeKind, SceneNode};
use tessera_engine::text::FontSpec;

use crate::batch::{balance_polyline, batch_figures, segment_figures};
use crate::cache::ResourceCache;
use crate::config::RenderConfig;
use crate::context::{
    HorizontalAlignment, RenderContext, Stroke, TextStyle, VerticalAlignment,
};

/// Ambient state read by every draw call.
#[derive(Debug, Clone, Default)]
struct GraphicsState {
    clip: Option<Rect>,
    tooltip: Option<Rc<str>>,
}

/// [`RenderContext`] that builds retained nodes on a [`Canvas`].
///
/// Thin lines are split into balanced polyline chunks, disjoint segments and
/// polygon batches are packed into capped multi-figure paths, and brushes and
/// bitmaps come from a [`ResourceCache`].
///
/// The context does not clear the canvas; callers call [`clear`](Self::clear)
/// before drawing a new frame and [`RenderContext::clean_up`] after it.
pub struct CanvasRenderContext<C: Canvas> {
    canvas: C,
    config: RenderConfig,
    cache: ResourceCache,
    state: GraphicsState,
}

impl<C: Canvas> CanvasRenderContext<C> {
    pub fn new(canvas: C) -> Self {
        Self::with_config(canvas, RenderConfig::default())
    }

    pub fn with_config(canvas: C, config: RenderConfig) -> Self {
        Self { canvas, config, cache: ResourceCache::new(), state: GraphicsState::default() }
    }

    #[inline]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    #[inline]
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    #[inline]
    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Removes every node from the canvas. Cached resources are kept.
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    // ── internal ──────────────────────────────────────────────────────────

    /// Appends `node` with the ambient tooltip and clip.
    ///
    /// The clip rectangle is stored relative to the node offset. Text nodes
    /// also get the inverse of their render transform so the clip stays put
    /// on the canvas.
    fn add(&mut self, mut node: SceneNode) -> NodeId {
        node.tooltip = self.state.tooltip.clone();
        if let Some(clip) = self.state.clip {
            let mut geometry = ClipGeometry::new(clip.relative_to(node.offset));
            if let NodeKind::Text(text) = &node.kind {
                geometry.transform = text.transform.invert();
            }
            node.clip = Some(geometry);
        }
        self.canvas.append(node)
    }

    fn brush(&mut self, color: Color) -> Option<Brush> {
        self.cache.brush(&mut self.canvas, color)
    }

    fn stroke_style(&mut self, stroke: &Stroke<'_>) -> Option<StrokeStyle> {
        if stroke.thickness <= 0.0 {
            return None;
        }
        let brush = self.brush(stroke.color)?;
        let dash = stroke
            .dash_array
            .and_then(|dashes| DashStyle::from_device_units(dashes, stroke.thickness, 0.0));
        Some(
            StrokeStyle::new(brush, stroke.thickness)
                .with_dash(dash)
                .with_line_join(stroke.line_join),
        )
    }

    fn align(points: &[ScreenPoint], aliased: bool) -> Vec<ScreenPoint> {
        if aliased {
            points.iter().map(|p| p.pixel_aligned()).collect()
        } else {
            points.to_vec()
        }
    }

    fn draw_balanced(&mut self, points: Vec<ScreenPoint>, style: StrokeStyle, edge_mode: EdgeMode) {
        let chunks = balance_polyline(&points, style.thickness, style.dash.is_some(), &self.config);
        log::trace!("line of {} points drawn as {} polylines", points.len(), chunks.len());
        for chunk in chunks {
            let mut style = style.clone();
            if let Some(dash) = style.dash.as_mut() {
                dash.offset = chunk.dash_offset;
            }
            self.add(SceneNode::polyline(chunk.points, style).with_edge_mode(edge_mode));
        }
    }

    fn add_paths(
        &mut self,
        figures: Vec<Figure>,
        fill: Option<Brush>,
        stroke: Option<StrokeStyle>,
        edge_mode: EdgeMode,
    ) {
        let dashed = stroke.as_ref().is_some_and(|s| s.dash.is_some());
        for geometry in batch_figures(figures, &self.config, dashed) {
            self.add(SceneNode::path(geometry, fill.clone(), stroke.clone()).with_edge_mode(edge_mode));
        }
    }
}

impl<C: Canvas> RenderContext for CanvasRenderContext<C> {
    fn renders_to_screen(&self) -> bool {
        self.config.renders_to_screen
    }

    fn draw_line(&mut self, points: &[ScreenPoint], stroke: &Stroke<'_>) {
        if points.is_empty() {
            return;
        }
        let Some(style) = self.stroke_style(stroke) else {
            return;
        };
        let edge_mode = EdgeMode::from_aliased(stroke.aliased);
        let points = Self::align(points, stroke.aliased);

        if stroke.thickness < self.config.balanced_line_thickness_limit {
            self.draw_balanced(points, style, edge_mode);
        } else {
            self.add(SceneNode::polyline(points, style).with_edge_mode(edge_mode));
        }
    }

    fn draw_line_segments(&mut self, points: &[ScreenPoint], stroke: &Stroke<'_>) {
        if points.len() < 2 {
            return;
        }
        let Some(style) = self.stroke_style(stroke) else {
            return;
        };
        let points = Self::align(points, stroke.aliased);
        let figures = segment_figures(&points).collect();
        self.add_paths(figures, None, Some(style), EdgeMode::from_aliased(stroke.aliased));
    }

    fn draw_polygon(&mut self, points: &[ScreenPoint], fill: Color, stroke: &Stroke<'_>) {
        if points.len() < 2 {
            return;
        }
        let fill = self.brush(fill);
        let style = self.stroke_style(stroke);
        if fill.is_none() && style.is_none() {
            return;
        }
        let points = Self::align(points, stroke.aliased);
        let node = SceneNode::polygon(points, fill, style);
        self.add(node.with_edge_mode(EdgeMode::from_aliased(stroke.aliased)));
    }

    fn draw_polygons(&mut self, polygons: &[Vec<ScreenPoint>], fill: Color, stroke: &Stroke<'_>) {
        let fill = self.brush(fill);
        let style = self.stroke_style(stroke);
        if fill.is_none() && style.is_none() {
            return;
        }
        let figures: Vec<Figure> = polygons
            .iter()
            .filter(|polygon| polygon.len() >= 2)
            .map(|polygon| Figure::closed(Self::align(polygon, stroke.aliased)))
            .collect();
        self.add_paths(figures, fill, style, EdgeMode::from_aliased(stroke.aliased));
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Color, stroke: &Stroke<'_>) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let fill = self.brush(fill);
        let style = self.stroke_style(stroke);
        if fill.is_none() && style.is_none() {
            return;
        }
        self.add(SceneNode::ellipse(rect, fill, style));
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Color, stroke: &Stroke<'_>) {
        if rect.is_empty() {
            return;
        }
        // Snapping can collapse a thin rectangle to nothing.
        let rect = if stroke.aliased { rect.pixel_aligned() } else { rect };
        if rect.is_empty() {
            return;
        }
        let fill = self.brush(fill);
        let style = self.stroke_style(stroke);
        if fill.is_none() && style.is_none() {
            return;
        }
        let node = SceneNode::rectangle(rect, fill, style);
        self.add(node.with_edge_mode(EdgeMode::from_aliased(stroke.aliased)));
    }

    fn draw_text(&mut self, position: ScreenPoint, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let Some(foreground) = self.brush(style.fill) else {
            return;
        };

        let mut size = self.canvas.measure_text(text, &style.font);
        if let Some(max) = style.max_size {
            size.width = size.width.min(max.width.max(0.0));
            size.height = size.height.min(max.height.max(0.0));
        }

        let dx = match style.horizontal {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => -size.width * 0.5,
            HorizontalAlignment::Right => -size.width,
        };
        let dy = match style.vertical {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Middle => -size.height * 0.5,
            VerticalAlignment::Bottom => -size.height,
        };

        // Shift to the anchor, rotate about it, then move it to `position`.
        let mut transform = Affine::translate(dx, dy);
        if style.rotation != 0.0 {
            transform = transform.then(Affine::rotate_degrees(style.rotation));
        }
        transform = transform.then(Affine::translate(position.x, position.y));

        let max_size = style.max_size.map(|_| size);
        self.add(SceneNode::text(text, style.font.clone(), foreground, transform, max_size));
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Size {
        if text.is_empty() {
            return Size::zero();
        }
        self.canvas.measure_text(text, font)
    }

    fn draw_image(
        &mut self,
        image: &ChartImage,
        src: Rect,
        dest: Rect,
        opacity: f32,
        interpolate: bool,
    ) -> Result<(), ImageError> {
        if src.width() <= 0.0 || src.height() <= 0.0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let bitmap = self.cache.bitmap(&mut self.canvas, image).inspect_err(|err| {
            log::warn!("cannot draw image {:?}: {err}", image.id());
        })?;

        let full = Rect::new(0.0, 0.0, bitmap.width() as f32, bitmap.height() as f32);
        let crop = if src == full { None } else { Some(src) };
        self.add(SceneNode::image(bitmap, crop, dest, opacity, interpolate));
        Ok(())
    }

    fn set_clip(&mut self, rect: Rect) -> bool {
        self.state.clip = Some(rect);
        true
    }

    fn reset_clip(&mut self) {
        self.state.clip = None;
    }

    fn set_tool_tip(&mut self, text: Option<&str>) {
        self.state.tooltip = text.map(Rc::from);
    }

    fn clean_up(&mut self) {
        self.cache.sweep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;
    use tessera_engine::image::{ImageFormat, PixelBuffer};
    use tessera_engine::paint::LineJoin;
    use tessera_engine::scene::Geometry;
    use tessera_engine::text::FontWeight;

    const RED: Color = Color::from_rgb(255, 0, 0);

    fn rc() -> CanvasRenderContext<RecordingCanvas> {
        CanvasRenderContext::new(RecordingCanvas::default())
    }

    fn pts(n: usize) -> Vec<ScreenPoint> {
        (0..n).map(|i| ScreenPoint::new(i as f32 * 2.0, (i % 5) as f32)).collect()
    }

    fn nodes(rc: &CanvasRenderContext<RecordingCanvas>) -> Vec<&SceneNode> {
        rc.canvas().graph().iter().collect()
    }

    fn checker_image() -> ChartImage {
        ChartImage::create(PixelBuffer::filled(8, 4, RED), ImageFormat::Png, None).unwrap()
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn thin_three_point_line_is_one_polyline_verbatim() {
        let mut rc = rc();
        let points = pts(3);
        rc.draw_line(&points, &Stroke::new(RED, 1.0));
        let nodes = nodes(&rc);
        assert_eq!(nodes.len(), 1);
        match &nodes[0].kind {
            NodeKind::Polyline(line) => {
                assert_eq!(line.points, points);
                assert_eq!(line.stroke.brush.color(), RED);
                assert!(line.stroke.dash.is_none());
            }
            other => panic!("expected polyline, got {}", other.name()),
        }
    }

    #[test]
    fn long_thin_line_is_balanced() {
        let mut rc = rc();
        rc.draw_line(&pts(100), &Stroke::new(RED, 1.0));
        // 16 points, then seed + 15 new points per chunk.
        assert_eq!(rc.canvas().node_count(), 99usize.div_ceil(15));
    }

    #[test]
    fn thick_line_is_one_polyline() {
        let mut rc = rc();
        rc.draw_line(&pts(1000), &Stroke::new(RED, 4.0));
        assert_eq!(rc.canvas().node_count(), 1);
    }

    #[test]
    fn dashed_chunks_carry_continuous_offsets() {
        let mut rc = rc();
        let dashes = [4.0, 2.0];
        let points = pts(40);
        rc.draw_line(&points, &Stroke::new(RED, 2.0).dashed(&dashes));

        let mut arc = 0.0f32;
        let mut last_end: Option<ScreenPoint> = None;
        for node in nodes(&rc) {
            let NodeKind::Polyline(line) = &node.kind else { panic!("expected polyline") };
            let dash = line.stroke.dash.as_ref().unwrap();
            assert_eq!(dash.array, vec![2.0, 1.0]);
            assert!((dash.offset - arc / 2.0).abs() < 1e-3);
            if let Some(end) = last_end {
                assert_eq!(line.points[0], end);
            }
            arc += line.points.windows(2).map(|w| w[0].distance(w[1])).sum::<f32>();
            last_end = line.points.last().copied();
        }
    }

    #[test]
    fn aliased_line_is_pixel_aligned() {
        let mut rc = rc();
        let points = [ScreenPoint::new(1.7, 2.2), ScreenPoint::new(10.1, 2.9)];
        rc.draw_line(&points, &Stroke::new(RED, 1.0).aliased(true).with_line_join(LineJoin::Bevel));
        let node = nodes(&rc)[0];
        assert_eq!(node.edge_mode, EdgeMode::Aliased);
        let NodeKind::Polyline(line) = &node.kind else { panic!("expected polyline") };
        assert_eq!(line.points, vec![ScreenPoint::new(1.5, 2.5), ScreenPoint::new(10.5, 2.5)]);
        assert_eq!(line.stroke.line_join, LineJoin::Bevel);
    }

    #[test]
    fn degenerate_lines_draw_nothing() {
        let mut rc = rc();
        rc.draw_line(&[], &Stroke::new(RED, 1.0));
        rc.draw_line(&pts(3), &Stroke::new(Color::UNDEFINED, 1.0));
        rc.draw_line(&pts(3), &Stroke::new(RED, 0.0));
        rc.draw_line_segments(&pts(1), &Stroke::new(RED, 1.0));
        assert_eq!(rc.canvas().node_count(), 0);
    }

    #[test]
    fn single_point_line_is_drawn() {
        let mut rc = rc();
        rc.draw_line(&pts(1), &Stroke::new(RED, 1.0));
        assert_eq!(rc.canvas().node_count(), 1);
    }

    // ── batched geometry ──────────────────────────────────────────────────

    #[test]
    fn ten_segments_make_one_geometry() {
        let mut rc = rc();
        rc.draw_line_segments(&pts(20), &Stroke::new(RED, 1.0));
        let nodes = nodes(&rc);
        assert_eq!(nodes.len(), 1);
        let NodeKind::Path(path) = &nodes[0].kind else { panic!("expected path") };
        assert_eq!(path.geometry.figure_count(), 10);
        assert!(path.geometry.is_stream());
        assert!(path.fill.is_none());
    }

    #[test]
    fn dashed_segments_are_one_figure_each() {
        let mut rc = rc();
        let dashes = [1.0, 1.0];
        rc.draw_line_segments(&pts(20), &Stroke::new(RED, 1.0).dashed(&dashes));
        assert_eq!(rc.canvas().node_count(), 10);
    }

    #[test]
    fn path_geometry_when_streams_are_disabled() {
        let config = RenderConfig::default().with_stream_geometry(false);
        let mut rc = CanvasRenderContext::with_config(RecordingCanvas::default(), config);
        rc.draw_line_segments(&pts(4), &Stroke::new(RED, 1.0));
        let NodeKind::Path(path) = &nodes(&rc)[0].kind else { panic!("expected path") };
        assert!(matches!(path.geometry, Geometry::Path(_)));
    }

    #[test]
    fn polygons_share_capped_geometries() {
        let mut rc = rc();
        let polygons: Vec<Vec<ScreenPoint>> = (0..20).map(|_| pts(4)).collect();
        rc.draw_polygons(&polygons, RED, &Stroke::new(Color::BLACK, 1.0));
        let counts: Vec<usize> = nodes(&rc)
            .iter()
            .map(|n| match &n.kind {
                NodeKind::Path(path) => {
                    assert!(path.fill.is_some() && path.stroke.is_some());
                    assert!(path.geometry.figures().iter().all(|f| f.closed && f.filled));
                    path.geometry.figure_count()
                }
                other => panic!("expected path, got {}", other.name()),
            })
            .collect();
        assert_eq!(counts, vec![16, 4]);
    }

    #[test]
    fn polygon_needs_some_paint() {
        let mut rc = rc();
        rc.draw_polygon(&pts(3), Color::UNDEFINED, &Stroke::none());
        rc.draw_polygon(&pts(1), RED, &Stroke::none());
        assert_eq!(rc.canvas().node_count(), 0);
        rc.draw_polygon(&pts(3), RED, &Stroke::none());
        let NodeKind::Polygon(polygon) = &nodes(&rc)[0].kind else { panic!("expected polygon") };
        assert!(polygon.stroke.is_none());
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn rectangle_is_placed_at_its_origin() {
        let mut rc = rc();
        rc.draw_rectangle(Rect::new(3.0, 4.0, 10.0, 5.0), RED, &Stroke::none());
        let node = nodes(&rc)[0];
        assert_eq!(node.offset, ScreenPoint::new(3.0, 4.0));
        let NodeKind::Rectangle(rect) = &node.kind else { panic!("expected rectangle") };
        assert_eq!(rect.size, Size::new(10.0, 5.0));
    }

    #[test]
    fn empty_shapes_are_skipped() {
        let mut rc = rc();
        rc.draw_rectangle(Rect::new(0.0, 0.0, 0.0, 5.0), RED, &Stroke::none());
        rc.draw_ellipse(Rect::new(0.0, 0.0, 5.0, -1.0), RED, &Stroke::none());
        rc.draw_ellipses(&[Rect::new(0.0, 0.0, 2.0, 2.0), Rect::new(0.0, 0.0, 0.0, 0.0)], RED, &Stroke::none());
        assert_eq!(rc.canvas().node_count(), 1);
    }

    #[test]
    fn aliased_rectangle_collapsing_to_nothing_is_skipped() {
        let mut rc = rc();
        let aliased = Stroke::none().aliased(true);
        rc.draw_rectangle(Rect::new(0.1, 0.0, 0.3, 5.0), RED, &aliased);
        assert_eq!(rc.canvas().node_count(), 0);

        rc.draw_rectangle(Rect::new(0.1, 0.0, 1.3, 5.0), RED, &aliased);
        let NodeKind::Rectangle(rect) = &nodes(&rc)[0].kind else { panic!("expected rectangle") };
        assert_eq!(rect.size, Size::new(1.0, 5.0));
    }

    // ── clipping and tooltips ─────────────────────────────────────────────

    #[test]
    fn clip_is_relative_to_node_offset() {
        let mut rc = rc();
        assert!(rc.set_clip(Rect::new(10.0, 10.0, 100.0, 50.0)));
        rc.draw_rectangle(Rect::new(30.0, 20.0, 5.0, 5.0), RED, &Stroke::none());
        rc.draw_line(&pts(3), &Stroke::new(RED, 1.0));
        rc.reset_clip();
        rc.draw_rectangle(Rect::new(30.0, 20.0, 5.0, 5.0), RED, &Stroke::none());

        let nodes = nodes(&rc);
        assert_eq!(nodes[0].clip, Some(ClipGeometry::new(Rect::new(-20.0, -10.0, 100.0, 50.0))));
        assert_eq!(nodes[1].clip, Some(ClipGeometry::new(Rect::new(10.0, 10.0, 100.0, 50.0))));
        assert!(nodes[2].clip.is_none());
    }

    #[test]
    fn text_clip_carries_inverse_transform() {
        let mut rc = rc();
        let clip = Rect::new(0.0, 0.0, 40.0, 40.0);
        rc.set_clip(clip);
        let style = TextStyle::new(RED, FontSpec::default()).rotated(90.0);
        rc.draw_text(ScreenPoint::new(20.0, 20.0), "abc", &style);

        let node = nodes(&rc)[0];
        let NodeKind::Text(text) = &node.kind else { panic!("expected text") };
        let geometry = node.clip.as_ref().unwrap();
        let back = geometry.transform.unwrap().then(text.transform);
        let corner = back.apply(ScreenPoint::new(40.0, 40.0));
        assert!((corner.x - 40.0).abs() < 1e-3 && (corner.y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn tooltip_applies_until_changed() {
        let mut rc = rc();
        rc.set_tool_tip(Some("series 1"));
        rc.draw_line(&pts(2), &Stroke::new(RED, 1.0));
        rc.draw_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), RED, &Stroke::none());
        rc.set_tool_tip(None);
        rc.draw_line(&pts(2), &Stroke::new(RED, 1.0));
        let tips: Vec<Option<&str>> = nodes(&rc).iter().map(|n| n.tooltip.as_deref()).collect();
        assert_eq!(tips, vec![Some("series 1"), Some("series 1"), None]);
    }

    // ── text ──────────────────────────────────────────────────────────────

    fn text_transform(rc: &CanvasRenderContext<RecordingCanvas>) -> Affine {
        match &nodes(rc).last().unwrap().kind {
            NodeKind::Text(text) => text.transform,
            other => panic!("expected text, got {}", other.name()),
        }
    }

    #[test]
    fn text_alignment_shifts_anchor() {
        let mut rc = rc();
        let font = FontSpec::new(None, 10.0, FontWeight::NORMAL);
        // "abcd" measures 20 x 10 on the recording canvas.
        let style = TextStyle::new(RED, font)
            .aligned(HorizontalAlignment::Right, VerticalAlignment::Middle);
        rc.draw_text(ScreenPoint::new(100.0, 50.0), "abcd", &style);
        let origin = text_transform(&rc).apply(ScreenPoint::zero());
        assert_eq!(origin, ScreenPoint::new(80.0, 45.0));
    }

    #[test]
    fn text_rotates_about_the_aligned_anchor() {
        let mut rc = rc();
        let font = FontSpec::new(None, 10.0, FontWeight::NORMAL);
        let style = TextStyle::new(RED, font)
            .aligned(HorizontalAlignment::Center, VerticalAlignment::Top)
            .rotated(90.0);
        rc.draw_text(ScreenPoint::new(100.0, 50.0), "abcd", &style);
        // Top-left (-10, 0) relative to the anchor turns to (0, -10).
        let origin = text_transform(&rc).apply(ScreenPoint::zero());
        assert!((origin.x - 100.0).abs() < 1e-4 && (origin.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn text_box_is_truncated_to_max_size() {
        let mut rc = rc();
        let font = FontSpec::new(None, 10.0, FontWeight::NORMAL);
        let style = TextStyle::new(RED, font)
            .aligned(HorizontalAlignment::Right, VerticalAlignment::Top)
            .with_max_size(Size::new(8.0, 100.0));
        rc.draw_text(ScreenPoint::new(50.0, 0.0), "abcd", &style);
        let node = nodes(&rc)[0];
        let NodeKind::Text(text) = &node.kind else { panic!("expected text") };
        assert_eq!(text.max_size, Some(Size::new(8.0, 10.0)));
        assert_eq!(text.transform.apply(ScreenPoint::zero()), ScreenPoint::new(42.0, 0.0));
    }

    #[test]
    fn empty_or_invisible_text_is_skipped() {
        let mut rc = rc();
        rc.draw_text(ScreenPoint::zero(), "", &TextStyle::new(RED, FontSpec::default()));
        rc.draw_text(ScreenPoint::zero(), "x", &TextStyle::new(Color::AUTOMATIC, FontSpec::default()));
        assert_eq!(rc.canvas().node_count(), 0);
    }

    #[test]
    fn measure_empty_text_skips_the_canvas() {
        let rc = rc();
        assert_eq!(rc.measure_text("", &FontSpec::default()), Size::zero());
        assert_eq!(rc.canvas().measure_calls(), 0);
        assert_eq!(rc.measure_text("ab\ncde", &FontSpec::default()), Size::new(18.0, 24.0));
        assert_eq!(rc.canvas().measure_calls(), 1);
    }

    // ── images ────────────────────────────────────────────────────────────

    #[test]
    fn full_source_rect_has_no_crop() {
        let mut rc = rc();
        let image = checker_image();
        rc.draw_image(&image, Rect::new(0.0, 0.0, 8.0, 4.0), Rect::new(5.0, 5.0, 16.0, 8.0), 1.0, true)
            .unwrap();
        let node = nodes(&rc)[0];
        assert_eq!(node.offset, ScreenPoint::new(5.0, 5.0));
        let NodeKind::Image(img) = &node.kind else { panic!("expected image") };
        assert!(img.crop.is_none());
        assert_eq!(img.size, Size::new(16.0, 8.0));
    }

    #[test]
    fn partial_source_rect_is_cropped_exactly() {
        let mut rc = rc();
        let image = checker_image();
        let src = Rect::new(2.0, 1.0, 4.0, 2.0);
        rc.draw_image(&image, src, Rect::new(0.0, 0.0, 4.0, 2.0), 0.5, false).unwrap();
        let NodeKind::Image(img) = &nodes(&rc)[0].kind else { panic!("expected image") };
        assert_eq!(img.crop, Some(src));
        assert_eq!(img.opacity, 0.5);
        assert!(!img.interpolate);
    }

    #[test]
    fn degenerate_image_rects_are_no_ops() {
        let mut rc = rc();
        let unknown = ChartImage::from_bytes(vec![0u8, 0]).unwrap();
        rc.draw_image(&unknown, Rect::new(0.0, 0.0, 0.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0), 1.0, true)
            .unwrap();
        rc.draw_image(&unknown, Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 1.0, -1.0), 1.0, true)
            .unwrap();
        assert_eq!(rc.canvas().node_count(), 0);
    }

    #[test]
    fn undecodable_image_fails_without_touching_the_scene() {
        let mut rc = rc();
        rc.draw_line(&pts(2), &Stroke::new(RED, 1.0));
        let unknown = ChartImage::from_bytes(vec![0u8, 0]).unwrap();
        let err = rc
            .draw_image(&unknown, Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0), 1.0, true)
            .unwrap_err();
        assert!(matches!(err, ImageError::UnknownFormat));
        assert_eq!(rc.canvas().node_count(), 1);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn clean_up_releases_images_of_previous_frames() {
        let mut rc = rc();
        let image = checker_image();
        let full = Rect::new(0.0, 0.0, 8.0, 4.0);
        rc.draw_image(&image, full, full, 1.0, true).unwrap();
        rc.draw_image(&image, full, full, 1.0, true).unwrap();
        assert_eq!(rc.canvas().bitmaps_created(), 1);

        rc.clean_up();
        assert!(rc.cache().contains_bitmap(image.id()));
        rc.clear();
        rc.clean_up();
        assert_eq!(rc.cache().bitmap_count(), 0);
        rc.clean_up();
        assert_eq!(rc.cache().bitmap_count(), 0);
    }

    #[test]
    fn invisible_colors_create_no_brushes() {
        let mut rc = rc();
        let clear_stroke = Stroke::new(Color::from_argb(0, 9, 9, 9), 1.0);
        for _ in 0..5 {
            rc.draw_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::UNDEFINED, &clear_stroke);
        }
        assert_eq!(rc.cache().brush_count(), 0);
        assert_eq!(rc.canvas().brushes_created(), 0);
    }

    #[test]
    fn renders_to_screen_follows_config() {
        assert!(rc().renders_to_screen());
        let config = RenderConfig::default().with_renders_to_screen(false);
        assert!(!CanvasRenderContext::with_config(RecordingCanvas::default(), config).renders_to_screen());
    }
}
