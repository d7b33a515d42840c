//! Paths, shapes, normalization into the unit box and arc-length resampling.

use thiserror::Error;

use super::core::{BBox, Point2, Tolerance, Vec2};
use super::segment::PathSegment;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    #[error("shape contains no segments")]
    Empty,
    #[error("shape has zero extent and cannot be normalized")]
    Degenerate,
    #[error("shape has zero length and cannot be resampled")]
    ZeroLength,
    #[error("step distance must be positive and finite, got {step}")]
    InvalidStep { step: f64 },
}

/// An ordered list of segments as produced by one path-data string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A segment paired with the cursor it starts from and its estimated length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSegment {
    pub segment: PathSegment,
    pub start: Point2,
    pub length: f64,
}

/// One or more paths traversed in order; the cursor carries across paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    paths: Vec<Path>,
}

impl Shape {
    #[must_use]
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.paths.iter().map(|path| path.segments.len()).sum()
    }

    /// Walks every segment with its start cursor and length.
    #[must_use]
    pub fn placed_segments(&self) -> Vec<PlacedSegment> {
        let mut cursor = Point2::ORIGIN;
        let mut placed = Vec::with_capacity(self.segment_count());
        for segment in self.paths.iter().flat_map(|path| path.segments.iter()) {
            placed.push(PlacedSegment {
                segment: *segment,
                start: cursor,
                length: segment.length(cursor),
            });
            cursor = segment.end_point(cursor);
        }
        placed
    }

    /// Sampled bounds of all paths.
    #[must_use]
    pub fn extents(&self) -> Option<BBox> {
        let mut cursor = Point2::ORIGIN;
        let mut bounds: Option<BBox> = None;
        for segment in self.paths.iter().flat_map(|path| path.segments.iter()) {
            let extents = segment.extents(cursor);
            bounds = Some(bounds.map_or(extents, |b| b.union(extents)));
            cursor = segment.end_point(cursor);
        }
        bounds
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.placed_segments().iter().map(|placed| placed.length).sum()
    }

    /// Centers the shape on the origin and scales its longer side to 1.
    ///
    /// # Errors
    /// [`ShapeError::Empty`] without segments and [`ShapeError::Degenerate`]
    /// when the extents are zero in both directions.
    pub fn normalized(&self) -> Result<Self, ShapeError> {
        let bounds = self.extents().ok_or(ShapeError::Empty)?;
        let size = bounds.size();
        let scale = if size.x > size.y { 1.0 / size.x } else { 1.0 / size.y };
        if !scale.is_finite() {
            return Err(ShapeError::Degenerate);
        }
        let offset = Vec2::new(
            -bounds.min.x - size.x * 0.5,
            -bounds.min.y - size.y * 0.5,
        );
        log::debug!("normalizing shape: offset=({}, {}) scale={scale}", offset.x, offset.y);

        let paths = self
            .paths
            .iter()
            .map(|path| {
                Path::new(
                    path.segments
                        .iter()
                        .map(|segment| segment.normalized(offset, scale))
                        .collect(),
                )
            })
            .collect();
        Ok(Self::new(paths))
    }

    /// Samples the shape every `step` units of arc length.
    ///
    /// The step is adjusted so the samples divide the total length evenly; the
    /// first and last samples are the path start and end. Samples that travel
    /// away and land back on the start (closed outlines) are dropped.
    ///
    /// # Errors
    /// [`ShapeError::InvalidStep`] for a non-positive step and
    /// [`ShapeError::ZeroLength`] when the shape has no measurable length.
    pub fn resample(&self, step: f64) -> Result<Vec<Point2>, ShapeError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ShapeError::InvalidStep { step });
        }
        let placed = self.placed_segments();
        let total: f64 = placed.iter().map(|p| p.length).sum();
        if !total.is_finite() || Tolerance::ZERO_LENGTH.is_zero_length(total) {
            return Err(ShapeError::ZeroLength);
        }

        let steps = (total / step).round().max(1.0) as usize;
        let step = total / steps as f64;
        let merge = Tolerance::SAMPLE_MERGE;

        let mut points: Vec<Point2> = Vec::with_capacity(steps + 1);
        let mut index = 0_usize;
        let mut travelled = 0.0;
        let mut end = Point2::ORIGIN;

        for p in &placed {
            if p.length <= 0.0 {
                continue;
            }
            end = p.segment.end_point(p.start);
            while index < steps {
                let distance = index as f64 * step;
                if distance >= travelled + p.length {
                    break;
                }
                let t = (distance - travelled) / p.length;
                push_sample(&mut points, p.segment.point_at(p.start, t), distance, merge);
                index += 1;
            }
            travelled += p.length;
        }
        push_sample(&mut points, end, total, merge);

        log::debug!(
            "resampled shape: length={total:.4} step={step:.4} points={}",
            points.len()
        );
        Ok(points)
    }
}

/// A sample closer than `merge` along the path can only be near the start
/// because it has not left it yet, so only samples past that distance merge.
fn push_sample(points: &mut Vec<Point2>, sample: Point2, distance: f64, merge: Tolerance) {
    match points.first() {
        Some(&first) if distance > merge.eps && merge.approx_eq_point2(first, sample) => {}
        _ => points.push(sample),
    }
}

impl From<Path> for Shape {
    fn from(path: Path) -> Self {
        Self::new(vec![path])
    }
}
