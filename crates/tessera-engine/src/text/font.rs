/// Numeric font weight on the usual 100–900 scale.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);

    /// Distance used when picking the closest registered face.
    #[inline]
    pub fn distance(self, other: FontWeight) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// Requested font for a text run.
///
/// `family = None` selects the default face. A non-positive `size` falls back
/// to [`FontSpec::DEFAULT_SIZE`].
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub const DEFAULT_SIZE: f32 = 12.0;

    pub fn new(family: Option<&str>, size: f32, weight: FontWeight) -> Self {
        Self {
            family: family.filter(|f| !f.is_empty()).map(str::to_string),
            size,
            weight,
        }
    }

    /// Font size with the fallback applied.
    #[inline]
    pub fn effective_size(&self) -> f32 {
        if self.size > 0.0 && self.size.is_finite() { self.size } else { Self::DEFAULT_SIZE }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { family: None, size: Self::DEFAULT_SIZE, weight: FontWeight::NORMAL }
    }
}
