use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use resvg::tiny_skia::{self, Mask, Pixmap, PixmapPaint};

use crate::scene::shapes::TextShape;

use super::rasterizer::Painter;

/// Draws a text run glyph by glyph. Each glyph's coverage is tinted with the
/// foreground color and composited through `ts`.
pub(super) fn draw_text(
    painter: &mut Painter<'_>,
    shape: &TextShape,
    ts: tiny_skia::Transform,
    mask: Option<&Mask>,
) {
    let fonts = painter.fonts;
    let Some(id) = fonts.resolve(&shape.font) else {
        log::trace!("no font loaded, skipping text {:?}", shape.text);
        return;
    };
    let Some(font) = fonts.get(id) else {
        return;
    };
    let size = shape.font.effective_size();
    let color = shape.foreground.color();

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(&shape.text, size, 0));

    for glyph in layout.glyphs() {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_indexed(glyph.key.glyph_index, size);
        let Some(mut tile) = Pixmap::new(metrics.width as u32, metrics.height as u32) else {
            continue;
        };
        // Premultiplied tint scaled by coverage.
        for (px, cov) in tile.data_mut().chunks_exact_mut(4).zip(&coverage) {
            let a = (*cov as u16 * color.a as u16 + 127) / 255;
            let premul = |v: u8| ((v as u16 * a + 127) / 255) as u8;
            px.copy_from_slice(&[premul(color.r), premul(color.g), premul(color.b), a as u8]);
        }
        let at = ts.pre_translate(glyph.x, glyph.y);
        painter.pixmap.draw_pixmap(0, 0, tile.as_ref(), &PixmapPaint::default(), at, mask);
    }
}
