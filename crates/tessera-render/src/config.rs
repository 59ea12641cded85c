/// Tunables of the canvas render context.
///
/// The defaults suit interactive charts: thin lines are split into bounded
/// chunks, disjoint shapes are merged into geometries of at most 16 figures.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Lines thinner than this are drawn as balanced polyline chunks.
    pub balanced_line_thickness_limit: f32,
    /// Upper bound on the chunks one balanced line is split into.
    pub max_polylines_per_line: usize,
    /// Lower bound on the points per balanced chunk.
    pub min_points_per_polyline: usize,
    /// Figures per batched geometry before it is sealed.
    pub max_figures_per_geometry: usize,
    /// Build batched geometry as sealed streams instead of mutable paths.
    pub use_stream_geometry: bool,
    /// Whether the target is shown on screen (false for offscreen export).
    pub renders_to_screen: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            balanced_line_thickness_limit: 3.5,
            max_polylines_per_line: 64,
            min_points_per_polyline: 16,
            max_figures_per_geometry: 16,
            use_stream_geometry: true,
            renders_to_screen: true,
        }
    }
}

impl RenderConfig {
    pub fn with_balanced_line_thickness_limit(mut self, limit: f32) -> Self {
        self.balanced_line_thickness_limit = limit;
        self
    }

    pub fn with_polyline_limits(mut self, max_polylines: usize, min_points: usize) -> Self {
        self.max_polylines_per_line = max_polylines;
        self.min_points_per_polyline = min_points;
        self
    }

    pub fn with_max_figures_per_geometry(mut self, max_figures: usize) -> Self {
        self.max_figures_per_geometry = max_figures;
        self
    }

    pub fn with_stream_geometry(mut self, use_stream_geometry: bool) -> Self {
        self.use_stream_geometry = use_stream_geometry;
        self
    }

    pub fn with_renders_to_screen(mut self, renders_to_screen: bool) -> Self {
        self.renders_to_screen = renders_to_screen;
        self
    }

    /// Points per balanced chunk for a line of `total` points.
    #[inline]
    pub fn points_per_polyline(&self, total: usize) -> usize {
        (total / self.max_polylines_per_line.max(1)).max(self.min_points_per_polyline).max(2)
    }
}
