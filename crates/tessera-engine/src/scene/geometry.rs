use std::rc::Rc;

use crate::coords::{Rect, ScreenPoint};

/// One connected run of points inside a [`Geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub points: Vec<ScreenPoint>,
    pub closed: bool,
    pub filled: bool,
}

impl Figure {
    /// An open, unfilled figure (a line segment or polyline).
    #[inline]
    pub fn open(points: Vec<ScreenPoint>) -> Self {
        Self { points, closed: false, filled: false }
    }

    /// A closed figure, filled when the owning node has a fill brush.
    #[inline]
    pub fn closed(points: Vec<ScreenPoint>) -> Self {
        Self { points, closed: true, filled: true }
    }
}

/// Multi-figure geometry.
///
/// Two construction strategies exist:
/// - `Stream`: written once through a [`GeometryBuilder`], immutable afterwards
/// - `Path`: a plain figure list that stays mutable after construction
///
/// Both render identically; they differ only in how consumers may treat them.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Stream(Rc<[Figure]>),
    Path(Vec<Figure>),
}

impl Geometry {
    #[inline]
    pub fn figures(&self) -> &[Figure] {
        match self {
            Geometry::Stream(figures) => figures,
            Geometry::Path(figures) => figures,
        }
    }

    #[inline]
    pub fn figure_count(&self) -> usize {
        self.figures().len()
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self, Geometry::Stream(_))
    }

    /// Mutable figure list, only available for path geometry.
    #[inline]
    pub fn figures_mut(&mut self) -> Option<&mut Vec<Figure>> {
        match self {
            Geometry::Stream(_) => None,
            Geometry::Path(figures) => Some(figures),
        }
    }

    /// Bounding box of every point, or `None` for an empty geometry.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.figures().iter().flat_map(|f| f.points.iter());
        let first = points.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::from_ltrb(x0, y0, x1, y1))
    }
}

/// Accumulates figures and produces a [`Geometry`] of the chosen strategy.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    stream: bool,
    figures: Vec<Figure>,
}

impl GeometryBuilder {
    #[inline]
    pub fn new(stream: bool) -> Self {
        Self { stream, figures: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Seals the accumulated figures and resets the builder for reuse.
    pub fn finish(&mut self) -> Geometry {
        let figures = std::mem::take(&mut self.figures);
        if self.stream {
            Geometry::Stream(figures.into())
        } else {
            Geometry::Path(figures)
        }
    }
}
