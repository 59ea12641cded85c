use std::fmt;
use std::str::FromStr;

/// Straight-alpha ARGB color with 8 bits per channel.
///
/// Two sentinel values live in channel space and compare by value like any
/// other color:
/// - [`Color::UNDEFINED`]: "do not draw"
/// - [`Color::AUTOMATIC`]: "resolve from the theme at render time"
///
/// Both carry alpha 0, so a backend that only checks visibility never draws them.
/// Colors are used as cache keys and hash by channel value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const UNDEFINED: Color = Color::from_argb(0, 0, 0, 0);
    pub const AUTOMATIC: Color = Color::from_argb(0, 0, 0, 1);
    pub const TRANSPARENT: Color = Color::UNDEFINED;
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Unpacks `0xAARRGGBB`.
    #[inline]
    pub const fn from_u32(argb: u32) -> Self {
        Self::from_argb((argb >> 24) as u8, (argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Packs into `0xAARRGGBB`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Same color with its alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::from_argb(a, self.r, self.g, self.b)
    }

    #[inline]
    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    #[inline]
    pub fn is_automatic(self) -> bool {
        self == Self::AUTOMATIC
    }

    /// True when drawing with this color produces no output.
    #[inline]
    pub fn is_invisible(self) -> bool {
        self.a == 0
    }

    #[inline]
    pub fn is_visible(self) -> bool {
        !self.is_invisible()
    }

    /// Resolves [`Color::AUTOMATIC`] to `default`; any other color is returned as is.
    #[inline]
    pub fn get_actual(self, default: Color) -> Color {
        if self.is_automatic() { default } else { self }
    }

    /// Returns `[r, g, b, a]` straight-alpha bytes.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::from_argb(rgba[3], rgba[0], rgba[1], rgba[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str("Undefined");
        }
        if self.is_automatic() {
            return f.write_str("Automatic");
        }
        write!(f, "#{:08x}", self.to_u32())
    }
}

/// Error returned when parsing a color literal fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color literal `{0}`")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `#RRGGBB`, `#AARRGGBB`, `Undefined` and `Automatic`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("undefined") {
            return Ok(Color::UNDEFINED);
        }
        if t.eq_ignore_ascii_case("automatic") {
            return Ok(Color::AUTOMATIC);
        }
        let hex = t.strip_prefix('#').ok_or_else(|| ParseColorError(s.to_string()))?;
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        match hex.len() {
            6 => Ok(Color::from_u32(0xff00_0000 | value)),
            8 => Ok(Color::from_u32(value)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_invisible_and_distinct() {
        assert!(Color::UNDEFINED.is_invisible());
        assert!(Color::AUTOMATIC.is_invisible());
        assert_ne!(Color::UNDEFINED, Color::AUTOMATIC);
        assert!(Color::UNDEFINED.is_undefined());
        assert!(!Color::AUTOMATIC.is_undefined());
    }

    #[test]
    fn u32_round_trip() {
        let c = Color::from_argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x8012_3456);
        assert_eq!(Color::from_u32(0x8012_3456), c);
    }

    #[test]
    fn get_actual_only_resolves_automatic() {
        let red = Color::from_rgb(255, 0, 0);
        assert_eq!(Color::AUTOMATIC.get_actual(red), red);
        assert_eq!(Color::BLACK.get_actual(red), Color::BLACK);
        assert_eq!(Color::UNDEFINED.get_actual(red), Color::UNDEFINED);
    }

    #[test]
    fn parse_hex_literals() {
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::from_rgb(255, 0, 0)));
        assert_eq!("#80ff0000".parse::<Color>(), Ok(Color::from_argb(0x80, 255, 0, 0)));
        assert_eq!("automatic".parse::<Color>(), Ok(Color::AUTOMATIC));
        assert!("ff0000".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }
}
