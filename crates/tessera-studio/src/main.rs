use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tessera_engine::coords::{Rect, ScreenPoint, Size};
use tessera_engine::image::{ChartImage, ImageFormat, PixelBuffer};
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::paint::{Color, LineJoin};
use tessera_engine::text::{FontSpec, FontSystem, FontWeight};
use tessera_render::{
    HorizontalAlignment, PngExporter, RenderConfig, RenderContext, Stroke, TextStyle,
    VerticalAlignment,
};

/// Renders a demonstration chart to a PNG file.
#[derive(Parser, Debug)]
#[command(name = "tessera-studio")]
#[command(version)]
struct Args {
    /// Output PNG path
    #[arg(short, long, default_value = "chart.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "500")]
    height: u32,

    /// Resolution in DPI
    #[arg(long, default_value = "96")]
    dpi: f32,

    /// TrueType/OpenType font for labels (defaults to a system font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Build batched geometry as mutable paths instead of sealed streams
    #[arg(long)]
    path_geometry: bool,

    /// Log filter (env_logger syntax)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log.clone(), ..LoggingConfig::default() });

    let mut fonts = FontSystem::new();
    match load_font(args.font.as_deref())? {
        Some(bytes) => {
            fonts.load_font(&bytes).context("parsing label font")?;
        }
        None => log::warn!("no font found, labels will not be drawn"),
    }

    let thumbnail = thumbnail().context("building thumbnail image")?;
    let config = RenderConfig::default().with_stream_geometry(!args.path_geometry);
    let mut exporter = PngExporter::new(args.width, args.height)
        .with_resolution(args.dpi)
        .with_config(config)
        .with_fonts(fonts);

    let plot = |rc: &mut dyn RenderContext, size: Size| draw_chart(rc, size, &thumbnail);
    exporter
        .export_to_file(&plot, &args.output)
        .with_context(|| format!("exporting chart to {}", args.output.display()))?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn load_font(explicit: Option<&Path>) -> Result<Option<Vec<u8>>> {
    if let Some(path) = explicit {
        let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        return Ok(Some(bytes));
    }
    Ok([
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok()))
}

/// Small gradient swatch drawn in the chart corner.
fn thumbnail() -> Result<ChartImage> {
    let mut pixels = PixelBuffer::filled(16, 16, Color::WHITE);
    for y in 0..16 {
        for x in 0..16 {
            pixels.set(x, y, Color::from_rgb((x * 16) as u8, (y * 16) as u8, 160));
        }
    }
    Ok(ChartImage::create(pixels, ImageFormat::Png, None)?)
}

// ── demo chart ────────────────────────────────────────────────────────────

const AXIS: Color = Color::from_rgb(40, 40, 40);
const GRID: Color = Color::from_rgb(200, 200, 200);
const SERIES: Color = Color::from_rgb(31, 119, 180);
const BARS: Color = Color::from_argb(160, 255, 127, 14);
const MARKERS: Color = Color::from_rgb(44, 160, 44);

fn draw_chart(rc: &mut dyn RenderContext, size: Size, thumbnail: &ChartImage) {
    let plot = Rect::from_ltrb(60.0, 30.0, size.width - 20.0, size.height - 50.0);
    if plot.is_empty() {
        return;
    }
    let x_at = |t: f32| plot.left() + t * plot.width();
    let y_at = |v: f32| plot.bottom() - (v + 1.2) / 2.4 * plot.height();
    let label = FontSpec::new(None, 11.0, FontWeight::NORMAL);

    // Gridlines and ticks.
    let grid: Vec<ScreenPoint> = (0..=10)
        .flat_map(|i| {
            let x = x_at(i as f32 / 10.0);
            [ScreenPoint::new(x, plot.top()), ScreenPoint::new(x, plot.bottom())]
        })
        .collect();
    rc.draw_line_segments(&grid, &Stroke::new(GRID, 1.0).dashed(&[3.0, 3.0]).aliased(true));
    let ticks: Vec<ScreenPoint> = (0..=10)
        .flat_map(|i| {
            let x = x_at(i as f32 / 10.0);
            [ScreenPoint::new(x, plot.bottom()), ScreenPoint::new(x, plot.bottom() + 5.0)]
        })
        .collect();
    rc.draw_line_segments(&ticks, &Stroke::new(AXIS, 1.0).aliased(true));

    // Bars.
    let bars: Vec<Rect> = (0..12)
        .map(|i| {
            let v = ((i as f32) * 0.7).sin().abs();
            let left = x_at(i as f32 / 12.0 + 0.01);
            Rect::from_ltrb(left, y_at(v - 1.2), left + plot.width() / 14.0, y_at(-1.2))
        })
        .collect();
    rc.draw_rectangles(&bars, BARS, &Stroke::none());

    // Clipped series.
    rc.set_clip(plot);
    rc.set_tool_tip(Some("damped sine"));
    let series: Vec<ScreenPoint> = (0..2000)
        .map(|i| {
            let t = i as f32 / 1999.0;
            ScreenPoint::new(x_at(t), y_at((t * 40.0).sin() * (-2.0 * t).exp() * 1.3))
        })
        .collect();
    rc.draw_line(&series, &Stroke::new(SERIES, 1.5).with_line_join(LineJoin::Round));
    rc.set_tool_tip(None);

    let markers: Vec<Rect> = (0..40)
        .map(|i| {
            let p = series[i * 50];
            Rect::new(p.x - 3.0, p.y - 3.0, 6.0, 6.0)
        })
        .collect();
    rc.draw_ellipses(&markers, MARKERS, &Stroke::new(Color::WHITE, 1.0));

    let triangles: Vec<Vec<ScreenPoint>> = (0..30)
        .map(|i| {
            let c = ScreenPoint::new(x_at(i as f32 / 30.0 + 0.015), y_at(1.0));
            vec![
                ScreenPoint::new(c.x, c.y - 5.0),
                ScreenPoint::new(c.x + 5.0, c.y + 4.0),
                ScreenPoint::new(c.x - 5.0, c.y + 4.0),
            ]
        })
        .collect();
    rc.draw_polygons(&triangles, Color::from_argb(128, 214, 39, 40), &Stroke::new(AXIS, 0.5));
    rc.reset_clip();

    // Axes and labels.
    rc.draw_line(
        &[
            ScreenPoint::new(plot.left(), plot.top()),
            ScreenPoint::new(plot.left(), plot.bottom()),
            ScreenPoint::new(plot.right(), plot.bottom()),
        ],
        &Stroke::new(AXIS, 1.0).aliased(true),
    );
    for i in 0..=10 {
        let text = format!("{:.1}", i as f32 / 10.0);
        let style = TextStyle::new(AXIS, label.clone())
            .aligned(HorizontalAlignment::Center, VerticalAlignment::Top);
        rc.draw_text(ScreenPoint::new(x_at(i as f32 / 10.0), plot.bottom() + 8.0), &text, &style);
    }
    let title = TextStyle::new(AXIS, FontSpec::new(None, 13.0, FontWeight::BOLD))
        .aligned(HorizontalAlignment::Center, VerticalAlignment::Bottom)
        .rotated(-90.0);
    rc.draw_text(ScreenPoint::new(plot.left() - 30.0, plot.center().y), "amplitude", &title);

    let swatch = Rect::new(plot.right() - 36.0, plot.top() + 4.0, 32.0, 32.0);
    let src = Rect::new(0.0, 0.0, thumbnail.width() as f32, thumbnail.height() as f32);
    if let Err(err) = rc.draw_image(thumbnail, src, swatch, 0.8, false) {
        log::warn!("thumbnail skipped: {err}");
    }
}
