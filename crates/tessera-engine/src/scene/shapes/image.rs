use crate::coords::{Rect, Size};
use crate::scene::{BitmapRef, NodeKind, SceneNode};

/// Bitmap stretched to `size`, top-left at the node offset.
///
/// `crop` selects the visible source pixels; `None` shows the whole bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    pub bitmap: BitmapRef,
    pub crop: Option<Rect>,
    pub size: Size,
    pub opacity: f32,
    pub interpolate: bool,
}

impl SceneNode {
    #[inline]
    pub fn image(
        bitmap: BitmapRef,
        crop: Option<Rect>,
        dest: Rect,
        opacity: f32,
        interpolate: bool,
    ) -> Self {
        Self::new(NodeKind::Image(ImageShape {
            bitmap,
            crop,
            size: dest.size,
            opacity,
            interpolate,
        }))
        .at(dest.origin)
    }
}
