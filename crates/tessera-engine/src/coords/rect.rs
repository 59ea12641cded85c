use super::{ScreenPoint, Size};

/// Axis-aligned rectangle (top-left origin + size).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: ScreenPoint,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: ScreenPoint::new(x, y),
            size: Size::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: ScreenPoint, size: Size) -> Self {
        Self { origin, size }
    }

    /// Builds a rectangle from its edges. Edges may be given in either order.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(left, top, right - left, bottom - top).normalized()
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Returns the rectangle shifted by `-offset`, i.e. expressed relative to
    /// a local origin placed at `offset`.
    #[inline]
    pub fn relative_to(self, offset: ScreenPoint) -> Self {
        Rect::from_origin_size(self.origin - offset, self.size)
    }

    /// Snaps the rectangle to whole pixels.
    ///
    /// Edges are rounded independently so adjacent rectangles keep sharing
    /// their common edge after snapping.
    #[inline]
    pub fn pixel_aligned(self) -> Self {
        let r = self.normalized();
        Rect::from_ltrb(
            r.left().round(),
            r.top().round(),
            r.right().round(),
            r.bottom().round(),
        )
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.width;
        let mut h = self.size.height;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: ScreenPoint) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.y >= r.top() && p.x < r.right() && p.y < r.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.left().max(b.left());
        let y0 = a.top().max(b.top());
        let x1 = a.right().min(b.right());
        let y1 = a.bottom().min(b.bottom());

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}
