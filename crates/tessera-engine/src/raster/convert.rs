use resvg::tiny_skia;

use crate::coords::Affine;
use crate::image::PixelBuffer;
use crate::paint::{Color, EdgeMode, LineJoin};
use crate::scene::shapes::StrokeStyle;

#[inline]
pub(super) fn transform(t: Affine) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(t.a, t.b, t.c, t.d, t.e, t.f)
}

#[inline]
pub(super) fn color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(super) fn solid_paint(c: Color, edge_mode: EdgeMode) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = edge_mode == EdgeMode::Smooth;
    paint
}

fn line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

/// Native stroke for `style`. Dash lengths are scaled back from thickness units.
pub(super) fn stroke(style: &StrokeStyle) -> tiny_skia::Stroke {
    let width = style.thickness.max(0.0);
    let dash = style.dash.as_ref().and_then(|dash| {
        let mut array: Vec<f32> = dash.array.iter().map(|d| d * width).collect();
        // An odd pattern repeats once to keep on/off pairs.
        if array.len() % 2 == 1 {
            array.extend_from_within(..);
        }
        tiny_skia::StrokeDash::new(array, dash.offset * width)
    });
    tiny_skia::Stroke {
        width,
        line_join: line_join(style.line_join),
        dash,
        ..tiny_skia::Stroke::default()
    }
}

/// Premultiplied pixmap copy of a straight-alpha buffer.
pub(super) fn pixmap_from_buffer(buffer: &PixelBuffer) -> Option<tiny_skia::Pixmap> {
    let size = tiny_skia::IntSize::from_wh(buffer.width(), buffer.height())?;
    let data = buffer
        .pixels()
        .iter()
        .flat_map(|c| {
            let a = c.a as u16;
            let premul = |v: u8| ((v as u16 * a + 127) / 255) as u8;
            [premul(c.r), premul(c.g), premul(c.b), c.a]
        })
        .collect();
    tiny_skia::Pixmap::from_vec(data, size)
}

/// Straight-alpha copy of a premultiplied pixmap.
pub(super) fn buffer_from_pixmap(pixmap: &tiny_skia::Pixmap) -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(pixmap.width(), pixmap.height(), Color::TRANSPARENT);
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        let x = i as u32 % pixmap.width();
        let y = i as u32 / pixmap.width();
        buffer.set(x, y, Color::from_argb(c.alpha(), c.red(), c.green(), c.blue()));
    }
    buffer
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::paint::{DashStyle, SolidBrush};

    #[test]
    fn affine_maps_like_tiny_skia() {
        let t = Affine::rotate_degrees(30.0).then(Affine::translate(4.0, 5.0));
        let mut p = [tiny_skia::Point::from_xy(2.0, 3.0)];
        transform(t).map_points(&mut p);
        let q = t.apply(crate::coords::ScreenPoint::new(2.0, 3.0));
        assert!((p[0].x - q.x).abs() < 1e-4 && (p[0].y - q.y).abs() < 1e-4);
    }

    #[test]
    fn dash_is_scaled_by_thickness_and_made_even() {
        let style = StrokeStyle::new(Rc::new(SolidBrush::new(Color::BLACK)), 2.0)
            .with_dash(Some(DashStyle { array: vec![3.0], offset: 0.5 }));
        let stroke = stroke(&style);
        assert_eq!(stroke.width, 2.0);
        assert!(stroke.dash.is_some());
    }

    #[test]
    fn premultiply_round_trip_keeps_opaque_pixels() {
        let buffer = PixelBuffer::filled(2, 2, Color::from_rgb(10, 20, 30));
        let pixmap = pixmap_from_buffer(&buffer).unwrap();
        assert_eq!(buffer_from_pixmap(&pixmap), buffer);
    }
}
