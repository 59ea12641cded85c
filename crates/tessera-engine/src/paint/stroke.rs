/// Shape of the corner where two stroked segments meet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Anti-aliasing policy of a node.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum EdgeMode {
    /// Anti-aliased edges.
    #[default]
    Smooth,
    /// Hard edges snapped to device pixels.
    Aliased,
}

impl EdgeMode {
    #[inline]
    pub fn from_aliased(aliased: bool) -> Self {
        if aliased { EdgeMode::Aliased } else { EdgeMode::Smooth }
    }
}

/// Dash pattern of a stroked node.
///
/// Both `array` and `offset` are expressed in units of the stroke thickness,
/// the native convention of the scene graph. A dash of length `2.0` on a
/// stroke of thickness `3.0` covers 6 device-independent units.
#[derive(Debug, Clone, PartialEq)]
pub struct DashStyle {
    pub array: Vec<f32>,
    pub offset: f32,
}

impl DashStyle {
    /// Builds a dash style from lengths given in device-independent units.
    ///
    /// Returns `None` for an empty pattern, a pattern with no positive length,
    /// or a non-positive thickness: such strokes are drawn solid.
    pub fn from_device_units(dashes: &[f32], thickness: f32, offset: f32) -> Option<Self> {
        if thickness <= 0.0 || !dashes.iter().any(|d| *d > 0.0) {
            return None;
        }
        Some(Self {
            array: dashes.iter().map(|d| d.max(0.0) / thickness).collect(),
            offset,
        })
    }

    /// Total pattern length in thickness units.
    #[inline]
    pub fn pattern_length(&self) -> f32 {
        self.array.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_style_is_scaled_by_thickness() {
        let dash = DashStyle::from_device_units(&[6.0, 3.0], 3.0, 0.5).expect("dashed");
        assert_eq!(dash.array, vec![2.0, 1.0]);
        assert_eq!(dash.offset, 0.5);
        assert_eq!(dash.pattern_length(), 3.0);
    }

    #[test]
    fn degenerate_dash_patterns_are_solid() {
        assert!(DashStyle::from_device_units(&[], 1.0, 0.0).is_none());
        assert!(DashStyle::from_device_units(&[0.0, 0.0], 1.0, 0.0).is_none());
        assert!(DashStyle::from_device_units(&[4.0, 2.0], 0.0, 0.0).is_none());
    }
}
