use super::ScreenPoint;

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub const fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    pub const fn translate(x: f32, y: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: x, f: y }
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    /// Clockwise rotation on screen (+Y down) by `degrees` about the origin.
    pub fn rotate_degrees(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(self, next: Affine) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    #[inline]
    pub fn apply(self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::identity()
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() <= f32::EPSILON || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Self {
            a,
            b,
            c,
            d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: ScreenPoint, b: ScreenPoint) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn then_applies_in_order() {
        let t = Affine::translate(10.0, 0.0).then(Affine::scale(2.0, 2.0));
        assert!(close(t.apply(ScreenPoint::new(1.0, 1.0)), ScreenPoint::new(22.0, 2.0)));
    }

    #[test]
    fn rotate_quarter_turn_is_clockwise_on_screen() {
        let p = Affine::rotate_degrees(90.0).apply(ScreenPoint::new(1.0, 0.0));
        assert!(close(p, ScreenPoint::new(0.0, 1.0)));
    }

    #[test]
    fn invert_round_trips() {
        let t = Affine::translate(-5.0, 3.0)
            .then(Affine::rotate_degrees(30.0))
            .then(Affine::translate(100.0, 50.0));
        let inv = t.invert().expect("rotation is invertible");
        let p = ScreenPoint::new(7.0, -2.0);
        assert!(close(inv.apply(t.apply(p)), p));
    }

    #[test]
    fn invert_singular_is_none() {
        assert!(Affine::scale(0.0, 1.0).invert().is_none());
    }
}
