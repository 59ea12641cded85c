use std::rc::Rc;

use super::Color;

/// Native solid-fill resource.
///
/// Brushes are immutable once created; scene nodes share them through
/// [`Brush`] handles so one brush serves every node painted with its color.
#[derive(Debug, PartialEq, Eq)]
pub struct SolidBrush {
    color: Color,
}

impl SolidBrush {
    #[inline]
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Shared handle to a native brush.
pub type Brush = Rc<SolidBrush>;
