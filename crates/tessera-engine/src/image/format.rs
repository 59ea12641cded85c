use std::fmt;

/// Container format of an encoded image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    Unknown,
    Bmp,
    Png,
    Jpeg,
}

/// Magic-byte rules, evaluated top to bottom; the first matching prefix wins.
///
/// Order matters once two formats share a prefix: put the longer signature first.
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (&[0xFF, 0xD8], ImageFormat::Jpeg),
    (&[0x42, 0x4D], ImageFormat::Bmp),
    (&[0x89, 0x50, 0x4E, 0x47], ImageFormat::Png),
];

impl ImageFormat {
    /// Determines the format from the first bytes of `bytes`.
    pub fn sniff(bytes: &[u8]) -> ImageFormat {
        SIGNATURES
            .iter()
            .find(|(signature, _)| bytes.starts_with(signature))
            .map_or(ImageFormat::Unknown, |(_, format)| *format)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Unknown => "unknown",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_known_signatures() {
        assert_eq!(ImageFormat::sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), ImageFormat::Png);
        assert_eq!(ImageFormat::sniff(&[0x42, 0x4D, 0x00]), ImageFormat::Bmp);
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
    }

    #[test]
    fn sniff_unknown_and_short_input() {
        assert_eq!(ImageFormat::sniff(&[0x00, 0x00]), ImageFormat::Unknown);
        assert_eq!(ImageFormat::sniff(&[0x89, 0x50]), ImageFormat::Unknown);
        assert_eq!(ImageFormat::sniff(&[]), ImageFormat::Unknown);
    }
}
