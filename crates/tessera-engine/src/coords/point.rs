use core::ops::{Add, Div, Mul, Sub};

/// Immutable point in device-independent units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: ScreenPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Snaps the point to the center of the pixel it falls in.
    ///
    /// Thin aliased strokes drawn through pixel centers cover exactly one
    /// pixel row/column instead of smearing across two.
    #[inline]
    pub fn pixel_aligned(self) -> Self {
        Self::new(self.x.trunc() + 0.5, self.y.trunc() + 0.5)
    }
}

impl Add for ScreenPoint {
    type Output = ScreenPoint;
    #[inline]
    fn add(self, rhs: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenPoint;
    #[inline]
    fn sub(self, rhs: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for ScreenPoint {
    type Output = ScreenPoint;
    #[inline]
    fn mul(self, rhs: f32) -> ScreenPoint {
        ScreenPoint::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for ScreenPoint {
    type Output = ScreenPoint;
    #[inline]
    fn div(self, rhs: f32) -> ScreenPoint {
        ScreenPoint::new(self.x / rhs, self.y / rhs)
    }
}
