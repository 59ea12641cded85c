use tessera_engine::coords::{Rect, ScreenPoint, Size};
use tessera_engine::image::{ChartImage, ImageError};
use tessera_engine::paint::{Color, LineJoin};
use tessera_engine::text::FontSpec;

/// Horizontal anchor of a text run relative to its position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text run relative to its position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Outline style of a draw call.
///
/// `dash_array` lengths are in device-independent units. With `aliased` set,
/// geometry is snapped to device pixels and drawn without anti-aliasing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke<'a> {
    pub color: Color,
    pub thickness: f32,
    pub dash_array: Option<&'a [f32]>,
    pub line_join: LineJoin,
    pub aliased: bool,
}

impl<'a> Stroke<'a> {
    #[inline]
    pub fn new(color: Color, thickness: f32) -> Self {
        Self { color, thickness, dash_array: None, line_join: LineJoin::Miter, aliased: false }
    }

    /// No outline.
    #[inline]
    pub fn none() -> Self {
        Self::new(Color::UNDEFINED, 0.0)
    }

    #[inline]
    pub fn dashed(mut self, dash_array: &'a [f32]) -> Self {
        self.dash_array = Some(dash_array);
        self
    }

    #[inline]
    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    #[inline]
    pub fn aliased(mut self, aliased: bool) -> Self {
        self.aliased = aliased;
        self
    }

    /// Visible color and positive thickness.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.color.is_visible() && self.thickness > 0.0
    }
}

/// Appearance of a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: Color,
    pub font: FontSpec,
    /// Clockwise rotation in degrees about the anchor.
    pub rotation: f32,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
    /// Truncates the measured box.
    pub max_size: Option<Size>,
}

impl TextStyle {
    pub fn new(fill: Color, font: FontSpec) -> Self {
        Self {
            fill,
            font,
            rotation: 0.0,
            horizontal: HorizontalAlignment::Left,
            vertical: VerticalAlignment::Top,
            max_size: None,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn aligned(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    pub fn with_max_size(mut self, max_size: Size) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

/// Stateless drawing contract between chart code and a render backend.
///
/// Calls are applied in order; later calls paint over earlier ones. Apart
/// from the ambient clip and tooltip, every call is self-describing.
/// Degenerate input (empty point lists, empty rectangles, invisible colors)
/// draws nothing and is never an error.
pub trait RenderContext {
    /// Whether output goes to a screen rather than an offscreen target.
    fn renders_to_screen(&self) -> bool;

    /// One open polyline through `points`.
    fn draw_line(&mut self, points: &[ScreenPoint], stroke: &Stroke<'_>);

    /// Disjoint segments from flattened pairs `(0,1) (2,3) ...`.
    fn draw_line_segments(&mut self, points: &[ScreenPoint], stroke: &Stroke<'_>);

    fn draw_polygon(&mut self, points: &[ScreenPoint], fill: Color, stroke: &Stroke<'_>);

    /// Many polygons sharing one style. Looks the same as calling
    /// [`draw_polygon`](Self::draw_polygon) for each.
    fn draw_polygons(&mut self, polygons: &[Vec<ScreenPoint>], fill: Color, stroke: &Stroke<'_>);

    /// Ellipse inscribed in `rect`.
    fn draw_ellipse(&mut self, rect: Rect, fill: Color, stroke: &Stroke<'_>);

    fn draw_ellipses(&mut self, rects: &[Rect], fill: Color, stroke: &Stroke<'_>) {
        for rect in rects {
            self.draw_ellipse(*rect, fill, stroke);
        }
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Color, stroke: &Stroke<'_>);

    fn draw_rectangles(&mut self, rects: &[Rect], fill: Color, stroke: &Stroke<'_>) {
        for rect in rects {
            self.draw_rectangle(*rect, fill, stroke);
        }
    }

    /// Text anchored at `position` according to the style's alignment.
    fn draw_text(&mut self, position: ScreenPoint, text: &str, style: &TextStyle);

    /// Size of `text` in `font`. Empty text measures as zero.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size;

    /// Draws the `src` pixels of `image` stretched into `dest`.
    ///
    /// Fails only when the image cannot be decoded.
    fn draw_image(
        &mut self,
        image: &ChartImage,
        src: Rect,
        dest: Rect,
        opacity: f32,
        interpolate: bool,
    ) -> Result<(), ImageError>;

    /// Clips every later node to `rect`. Returns whether clipping is supported.
    fn set_clip(&mut self, rect: Rect) -> bool;

    fn reset_clip(&mut self);

    /// Tooltip attached to every later node; `None` clears it.
    fn set_tool_tip(&mut self, text: Option<&str>);

    /// Ends a frame: releases resources that the frame did not use.
    fn clean_up(&mut self);
}
