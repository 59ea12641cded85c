use std::collections::HashMap;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Size;

use super::{FontSpec, FontWeight};

/// Line height used when no font is available, as a multiple of the font size.
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts and the family/weight registry used to
/// resolve [`FontSpec`]s.
///
/// The first loaded font is the default face: it serves specs without a family
/// and specs naming an unknown family.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    /// Lower-cased family name -> registered faces.
    families: HashMap<String, Vec<(FontWeight, FontId)>>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new(), families: HashMap::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// The face is registered under the family name embedded in the font, if
    /// any, with normal weight.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = parse(bytes)?;
        let family = font.name().map(str::to_string);
        let id = self.push(font);
        if let Some(family) = family {
            self.register(&family, FontWeight::NORMAL, id);
        }
        Ok(id)
    }

    /// Parses a font and registers it explicitly under `family` / `weight`.
    pub fn load_family(
        &mut self,
        family: &str,
        weight: FontWeight,
        bytes: &[u8],
    ) -> Result<FontId, FontLoadError> {
        let id = self.push(parse(bytes)?);
        self.register(family, weight, id);
        Ok(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Picks the face for `spec`: the registered face of the requested family
    /// whose weight is closest, else the default face.
    pub fn resolve(&self, spec: &FontSpec) -> Option<FontId> {
        if let Some(family) = spec.family.as_deref() {
            match self.families.get(&family.to_lowercase()) {
                Some(faces) => {
                    return faces
                        .iter()
                        .min_by_key(|(w, _)| w.distance(spec.weight))
                        .map(|(_, id)| *id);
                }
                None => log::debug!("unknown font family {family:?}, using default face"),
            }
        }
        if self.fonts.is_empty() { None } else { Some(FontId(0)) }
    }

    /// Measures `text` for `spec`.
    ///
    /// Newlines start new lines: width is the widest line, height the total of
    /// all lines. Empty text measures as zero without touching the layout engine.
    #[must_use]
    pub fn measure(&self, text: &str, spec: &FontSpec) -> Size {
        if text.is_empty() {
            return Size::zero();
        }
        let size = spec.effective_size();
        match self.resolve(spec) {
            Some(id) => self.measure_text(text, id, size, None),
            None => {
                let lines = text.split('\n').count() as f32;
                Size::new(0.0, size * FALLBACK_LINE_HEIGHT * lines)
            }
        }
    }

    /// Computes the bounding box of a laid-out text string.
    ///
    /// Returns `(width, height)` in device-independent units.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Size {
        let Some(font) = self.get(id) else {
            return Size::new(0.0, size * FALLBACK_LINE_HEIGHT);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Size::new(0.0, size * FALLBACK_LINE_HEIGHT);
        }

        // Pen position after each glyph rather than the bitmap right edge, so
        // trailing spaces and advance-only glyphs count towards the width.
        // Line breaks map to the missing glyph and carry no advance.
        let w = glyphs
            .iter()
            .filter(|g| !g.parent.is_control())
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(size);
        Size::new(w, h)
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn push(&mut self, font: fontdue::Font) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        id
    }

    fn register(&mut self, family: &str, weight: FontWeight, id: FontId) {
        log::debug!("registered font family {family:?} weight {}", weight.0);
        self.families.entry(family.to_lowercase()).or_default().push((weight, id));
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(bytes: &[u8]) -> Result<fontdue::Font, FontLoadError> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| FontLoadError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        let fonts = FontSystem::new();
        assert_eq!(fonts.measure("", &FontSpec::default()), Size::zero());
    }

    #[test]
    fn no_fonts_uses_fallback_line_height() {
        let fonts = FontSystem::new();
        let spec = FontSpec::new(Some("Arial"), 10.0, FontWeight::NORMAL);
        assert_eq!(fonts.measure("ab\ncd", &spec), Size::new(0.0, 24.0));
        assert!(fonts.resolve(&spec).is_none());
    }

    #[test]
    fn invalid_font_bytes_fail() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(&[0, 1, 2, 3]).is_err());
        assert!(fonts.is_empty());
    }
    // ── loaded faces ──────────────────────────────────────────────────────

    /// A system sans face; tests using it return early on machines without one.
    fn system_font() -> Option<Vec<u8>> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        ]
        .iter()
        .find_map(|p| std::fs::read(p).ok())
    }

    #[test]
    fn loaded_face_measures_lines() {
        let Some(bytes) = system_font() else { return };
        let mut fonts = FontSystem::new();
        fonts.load_font(&bytes).unwrap();
        let spec = FontSpec::new(None, 10.0, FontWeight::NORMAL);

        let ab = fonts.measure("ab", &spec);
        let abcd = fonts.measure("abcd", &spec);
        assert!(ab.width > 0.0);
        assert!(abcd.width > ab.width);
        assert!(ab.height >= 10.0);

        // Widest line sets the width, every line adds its height.
        let two_lines = fonts.measure("abcd\nx", &spec);
        assert!((two_lines.width - abcd.width).abs() < 0.01);
        assert!((two_lines.height - 2.0 * ab.height).abs() < 0.5);
    }

    #[test]
    fn family_resolves_closest_weight() {
        let Some(bytes) = system_font() else { return };
        let mut fonts = FontSystem::new();
        let regular = fonts.load_family("Chart Sans", FontWeight::NORMAL, &bytes).unwrap();
        let bold = fonts.load_family("Chart Sans", FontWeight::BOLD, &bytes).unwrap();

        let spec = |weight| FontSpec::new(Some("chart sans"), 12.0, weight);
        assert_eq!(fonts.resolve(&spec(FontWeight::SEMI_BOLD)), Some(bold));
        assert_eq!(fonts.resolve(&spec(FontWeight::LIGHT)), Some(regular));
        let unknown = FontSpec::new(Some("Nope"), 12.0, FontWeight::BOLD);
        assert_eq!(fonts.resolve(&unknown), Some(FontId(0)));
    }
}
