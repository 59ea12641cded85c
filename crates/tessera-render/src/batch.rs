//! Geometry batching.
//!
//! Splits long or numerous primitives into a bounded number of scene nodes
//! without changing what ends up on screen:
//! - [`balance_polyline`] cuts one long polyline into seamless chunks and
//!   keeps the dash phase continuous across them
//! - [`FigureBatcher`] packs disjoint figures into capped multi-figure geometries

use tessera_engine::coords::ScreenPoint;
use tessera_engine::scene::{Figure, Geometry, GeometryBuilder};

use crate::config::RenderConfig;

// ── balanced polylines ────────────────────────────────────────────────────

/// One chunk of a balanced polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineChunk {
    pub points: Vec<ScreenPoint>,
    /// Dash phase at the first point, in stroke thickness units.
    pub dash_offset: f32,
}

/// Splits `points` into polyline chunks of at most
/// [`RenderConfig::points_per_polyline`] points.
///
/// Every chunk after the first starts with the last point of the previous
/// one. With `dashed` set, each chunk's dash offset is the arc length drawn
/// before it divided by `thickness`. An empty input yields no chunk; a single
/// point yields one single-point chunk.
pub fn balance_polyline(
    points: &[ScreenPoint],
    thickness: f32,
    dashed: bool,
    config: &RenderConfig,
) -> Vec<PolylineChunk> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let per_chunk = config.points_per_polyline(n);
    let mut chunks = Vec::with_capacity(n / per_chunk + 1);
    let mut current: Vec<ScreenPoint> = Vec::with_capacity(per_chunk);
    let mut line_length = 0.0f32;
    let mut dash_offset = 0.0f32;
    let mut last: Option<ScreenPoint> = None;

    for (i, &p) in points.iter().enumerate() {
        current.push(p);
        if dashed {
            if let Some(last) = last {
                line_length += last.distance(p);
            }
        }
        last = Some(p);

        if current.len() >= per_chunk || i == n - 1 {
            let seed = p;
            chunks.push(PolylineChunk { points: std::mem::take(&mut current), dash_offset });
            if dashed && thickness > 0.0 {
                dash_offset = line_length / thickness;
            }
            current.reserve(per_chunk);
            current.push(seed);
        }
    }

    chunks
}

// ── figure-capped geometry ────────────────────────────────────────────────

/// Packs figures into geometries of at most `cap` figures each.
///
/// Dashed geometries hold a single figure.
#[derive(Debug)]
pub struct FigureBatcher {
    cap: usize,
    builder: GeometryBuilder,
}

impl FigureBatcher {
    pub fn new(config: &RenderConfig, dashed: bool) -> Self {
        let cap = if dashed { 1 } else { config.max_figures_per_geometry.max(1) };
        Self { cap, builder: GeometryBuilder::new(config.use_stream_geometry) }
    }

    /// Adds `figure`; returns the sealed geometry once the cap is reached.
    pub fn push(&mut self, figure: Figure) -> Option<Geometry> {
        self.builder.push(figure);
        if self.builder.len() >= self.cap { Some(self.builder.finish()) } else { None }
    }

    /// Seals the open geometry, if it holds any figure.
    pub fn finish(mut self) -> Option<Geometry> {
        if self.builder.is_empty() { None } else { Some(self.builder.finish()) }
    }
}

/// Batches `figures` into capped geometries.
pub fn batch_figures(
    figures: impl IntoIterator<Item = Figure>,
    config: &RenderConfig,
    dashed: bool,
) -> Vec<Geometry> {
    let mut batcher = FigureBatcher::new(config, dashed);
    let mut out: Vec<Geometry> = figures.into_iter().filter_map(|f| batcher.push(f)).collect();
    out.extend(batcher.finish());
    out
}

/// Open two-point figures from flattened pairs `(0,1) (2,3) ...`.
///
/// A trailing unpaired point is ignored.
pub fn segment_figures(points: &[ScreenPoint]) -> impl Iterator<Item = Figure> + '_ {
    points.chunks_exact(2).map(|pair| Figure::open(pair.to_vec()))
}
