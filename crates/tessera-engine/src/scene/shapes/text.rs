use crate::coords::{Affine, Size};
use crate::paint::Brush;
use crate::scene::{NodeKind, SceneNode};
use crate::text::FontSpec;

/// Text run laid out from its local origin, top-left aligned.
///
/// `transform` positions the run on the canvas (alignment shift, rotation and
/// anchor translation). `max_size` truncates the laid-out box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub font: FontSpec,
    pub foreground: Brush,
    pub transform: Affine,
    pub max_size: Option<Size>,
}

impl SceneNode {
    #[inline]
    pub fn text(
        text: impl Into<String>,
        font: FontSpec,
        foreground: Brush,
        transform: Affine,
        max_size: Option<Size>,
    ) -> Self {
        Self::new(NodeKind::Text(TextShape {
            text: text.into(),
            font,
            foreground,
            transform,
            max_size,
        }))
    }
}
