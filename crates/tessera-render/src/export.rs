use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tessera_engine::coords::Size;
use tessera_engine::image::{ChartImage, EncoderOptions, ImageError, ImageFormat, PngEncoderOptions};
use tessera_engine::paint::Color;
use tessera_engine::raster::{RasterError, Rasterizer};
use tessera_engine::scene::SceneCanvas;
use tessera_engine::text::FontSystem;

use crate::canvas::CanvasRenderContext;
use crate::config::RenderConfig;
use crate::context::RenderContext;

/// Something that draws itself through a [`RenderContext`].
pub trait Plot {
    /// Issues one frame of draw calls for a target of `size`.
    fn render(&self, rc: &mut dyn RenderContext, size: Size);
}

impl<F> Plot for F
where
    F: Fn(&mut dyn RenderContext, Size),
{
    fn render(&self, rc: &mut dyn RenderContext, size: Size) {
        self(rc, size)
    }
}

/// Error returned by [`PngExporter`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot export a {width}x{height} image")]
    InvalidSize { width: u32, height: u32 },

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders plots offscreen and writes them as PNG.
///
/// `width` and `height` are in pixels. Scene units are scaled by
/// `resolution / 96`, so a higher resolution draws the same plot with more
/// pixels; the resolution is also stored in the PNG.
pub struct PngExporter {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Dots per inch.
    pub resolution: f32,
    config: RenderConfig,
    fonts: FontSystem,
}

impl PngExporter {
    pub const DEFAULT_RESOLUTION: f32 = 96.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            resolution: Self::DEFAULT_RESOLUTION,
            config: RenderConfig::default(),
            fonts: FontSystem::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_resolution(mut self, dpi: f32) -> Self {
        self.resolution = dpi;
        self
    }

    pub fn with_fonts(mut self, fonts: FontSystem) -> Self {
        self.fonts = fonts;
        self
    }

    /// Render tunables. Offscreen export always reports `renders_to_screen = false`.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn fonts_mut(&mut self) -> &mut FontSystem {
        &mut self.fonts
    }

    /// Renders `plot` once and writes the PNG to `writer`.
    pub fn export(&mut self, plot: &dyn Plot, writer: &mut dyn Write) -> Result<(), ExportError> {
        let image = self.render(plot)?;
        writer.write_all(image.data())?;
        writer.flush()?;
        Ok(())
    }

    pub fn export_to_bytes(&mut self, plot: &dyn Plot) -> Result<Vec<u8>, ExportError> {
        Ok(self.render(plot)?.data().to_vec())
    }

    pub fn export_to_file(&mut self, plot: &dyn Plot, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.export(plot, &mut writer)?;
        log::info!("exported {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn render(&mut self, plot: &dyn Plot) -> Result<ChartImage, ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::InvalidSize { width: self.width, height: self.height });
        }
        let resolution = if self.resolution > 0.0 { self.resolution } else { Self::DEFAULT_RESOLUTION };
        let scale = resolution / Self::DEFAULT_RESOLUTION;
        let size = Size::new(self.width as f32 / scale, self.height as f32 / scale);

        let canvas = SceneCanvas::new(std::mem::take(&mut self.fonts));
        let config = self.config.clone().with_renders_to_screen(false);
        let mut rc = CanvasRenderContext::with_config(canvas, config);
        plot.render(&mut rc, size);
        rc.clean_up();
        let canvas = rc.into_canvas();

        let pixels = Rasterizer::new(self.width, self.height)
            .with_scale(scale)
            .with_background(self.background)
            .render(canvas.graph(), canvas.fonts());
        log::debug!("export drew {} nodes", canvas.stats().nodes_appended);
        self.fonts = canvas.into_fonts();

        let options = EncoderOptions::from(PngEncoderOptions { dpi_x: resolution, dpi_y: resolution });
        Ok(ChartImage::create(pixels?, ImageFormat::Png, Some(&options))?)
    }
}
