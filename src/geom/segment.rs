use thiserror::Error;

use super::arc::EllipticalArc;
use super::core::{BBox, Point2, Vec2};

/// Number of sample intervals used for length and extent estimation.
pub const LENGTH_SAMPLES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("zero-radius elliptical arcs are not implemented")]
    ZeroRadiusArc,
    #[error("elliptical arc parameters must be finite")]
    NonFiniteArc,
}

/// Whether the coordinates of a segment are absolute or offsets from its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Positioning {
    Absolute,
    Relative,
}

/// Geometry of a single path command. For [`Positioning::Relative`] segments
/// every point is an offset from the segment start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentKind {
    Move { to: Point2 },
    Line { to: Point2 },
    HorizontalLine { x: f64 },
    VerticalLine { y: f64 },
    CubicBezier {
        control1: Point2,
        control2: Point2,
        to: Point2,
    },
    EllipticalArc { arc: EllipticalArc, to: Point2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub positioning: Positioning,
}

impl PathSegment {
    #[must_use]
    pub const fn new(kind: SegmentKind, positioning: Positioning) -> Self {
        Self { kind, positioning }
    }

    #[must_use]
    pub const fn absolute(kind: SegmentKind) -> Self {
        Self::new(kind, Positioning::Absolute)
    }

    #[must_use]
    pub const fn relative(kind: SegmentKind) -> Self {
        Self::new(kind, Positioning::Relative)
    }

    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self.kind, SegmentKind::Move { .. })
    }

    /// Resolves a stored point against the segment start.
    fn resolve(&self, start: Point2, p: Point2) -> Point2 {
        match self.positioning {
            Positioning::Absolute => p,
            Positioning::Relative => start.add_vec(p.to_vec2()),
        }
    }

    /// Position at parameter `t` in `[0, 1]` for a segment beginning at `start`.
    ///
    /// Returns `start` at `t = 0` for everything except moves, which report
    /// their destination for every `t`.
    #[must_use]
    pub fn point_at(&self, start: Point2, t: f64) -> Point2 {
        match self.kind {
            SegmentKind::Move { to } => self.resolve(start, to),
            SegmentKind::Line { to } => start.lerp(self.resolve(start, to), t),
            SegmentKind::HorizontalLine { .. } | SegmentKind::VerticalLine { .. } => {
                start.lerp(self.end_point(start), t)
            }
            SegmentKind::CubicBezier {
                control1,
                control2,
                to,
            } => {
                let p1 = self.resolve(start, control1);
                let p2 = self.resolve(start, control2);
                let p3 = self.resolve(start, to);
                cubic_point(start, p1, p2, p3, t.clamp(0.0, 1.0))
            }
            SegmentKind::EllipticalArc { arc, to } => {
                arc.point_at(start, self.resolve(start, to), t)
            }
        }
    }

    /// Unit tangent at `t`; the zero vector for moves and zero-length motion.
    #[must_use]
    pub fn direction_at(&self, start: Point2, t: f64) -> Vec2 {
        match self.kind {
            SegmentKind::Move { .. } => Vec2::ZERO,
            SegmentKind::Line { .. }
            | SegmentKind::HorizontalLine { .. }
            | SegmentKind::VerticalLine { .. } => {
                self.end_point(start).sub_point(start).normalized_or_zero()
            }
            SegmentKind::CubicBezier {
                control1,
                control2,
                to,
            } => {
                let p1 = self.resolve(start, control1);
                let p2 = self.resolve(start, control2);
                let p3 = self.resolve(start, to);
                cubic_derivative(start, p1, p2, p3, t.clamp(0.0, 1.0)).normalized_or_zero()
            }
            SegmentKind::EllipticalArc { arc, to } => {
                arc.direction_at(start, self.resolve(start, to), t)
            }
        }
    }

    /// Where the cursor sits after this segment.
    #[must_use]
    pub fn end_point(&self, start: Point2) -> Point2 {
        match (self.kind, self.positioning) {
            (SegmentKind::HorizontalLine { x }, Positioning::Absolute) => Point2::new(x, start.y),
            (SegmentKind::HorizontalLine { x }, Positioning::Relative) => {
                Point2::new(start.x + x, start.y)
            }
            (SegmentKind::VerticalLine { y }, Positioning::Absolute) => Point2::new(start.x, y),
            (SegmentKind::VerticalLine { y }, Positioning::Relative) => {
                Point2::new(start.x, start.y + y)
            }
            (
                SegmentKind::Move { to }
                | SegmentKind::Line { to }
                | SegmentKind::CubicBezier { to, .. }
                | SegmentKind::EllipticalArc { to, .. },
                _,
            ) => self.resolve(start, to),
        }
    }

    fn samples(&self, start: Point2) -> impl Iterator<Item = Point2> + '_ {
        (0..=LENGTH_SAMPLES).map(move |i| self.point_at(start, i as f64 / LENGTH_SAMPLES as f64))
    }

    /// Polyline approximation of the arc length over [`LENGTH_SAMPLES`] intervals.
    #[must_use]
    pub fn length(&self, start: Point2) -> f64 {
        if self.is_move() {
            return 0.0;
        }
        let mut previous = start;
        let mut total = 0.0;
        for p in self.samples(start) {
            total += previous.distance_to(p);
            previous = p;
        }
        total
    }

    /// Sampled bounds of the segment, including its destination.
    #[must_use]
    pub fn extents(&self, start: Point2) -> BBox {
        self.samples(start)
            .fold(BBox::from_point(self.point_at(start, 0.0).extend(0.0)), |bbox, p| {
                bbox.expand_point(p.extend(0.0))
            })
    }

    /// Re-expresses the segment as `(coordinate + offset) * scale`. Relative
    /// offsets and arc radii only scale.
    #[must_use]
    pub fn normalized(&self, offset: Vec2, scale: f64) -> Self {
        let point = |p: Point2| match self.positioning {
            Positioning::Absolute => {
                Point2::new((p.x + offset.x) * scale, (p.y + offset.y) * scale)
            }
            Positioning::Relative => Point2::new(p.x * scale, p.y * scale),
        };
        let (dx, dy) = match self.positioning {
            Positioning::Absolute => (offset.x, offset.y),
            Positioning::Relative => (0.0, 0.0),
        };

        let kind = match self.kind {
            SegmentKind::Move { to } => SegmentKind::Move { to: point(to) },
            SegmentKind::Line { to } => SegmentKind::Line { to: point(to) },
            SegmentKind::HorizontalLine { x } => SegmentKind::HorizontalLine {
                x: (x + dx) * scale,
            },
            SegmentKind::VerticalLine { y } => SegmentKind::VerticalLine {
                y: (y + dy) * scale,
            },
            SegmentKind::CubicBezier {
                control1,
                control2,
                to,
            } => SegmentKind::CubicBezier {
                control1: point(control1),
                control2: point(control2),
                to: point(to),
            },
            SegmentKind::EllipticalArc { arc, to } => SegmentKind::EllipticalArc {
                arc: arc.scaled(scale),
                to: point(to),
            },
        };
        Self::new(kind, self.positioning)
    }
}

fn cubic_point(p0: Point2, p1: Point2, p2: Point2, p3: Point2, t: f64) -> Point2 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point2::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

fn cubic_derivative(p0: Point2, p1: Point2, p2: Point2, p3: Point2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    let a = (p1 - p0) * (3.0 * u * u);
    let b = (p2 - p1) * (6.0 * u * t);
    let c = (p3 - p2) * (3.0 * t * t);
    a + b + c
}
