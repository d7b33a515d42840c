//! Elliptical arcs in endpoint form.
//!
//! Path data describes an arc by its two endpoints, the ellipse radii, the
//! x-axis rotation and the large-arc / sweep flags. Evaluating a point needs
//! the center form (center, radii, start angle, sweep angle), so every query
//! converts first. Radii that are too small to connect the endpoints are
//! inflated uniformly until the endpoints lie on the ellipse.

use std::f64::consts::TAU;

use super::core::{Point2, Vec2};
use super::segment::SegmentError;

/// Radii, rotation and flags of an elliptical arc. The endpoints are supplied
/// by the owning segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    radius_x: f64,
    radius_y: f64,
    rotation_degrees: f64,
    large_arc: bool,
    sweep: bool,
}

/// Center parameterization of an arc between two concrete endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    pub center: Point2,
    pub radius_x: f64,
    pub radius_y: f64,
    pub cos_phi: f64,
    pub sin_phi: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl EllipticalArc {
    /// Builds an arc. `sweep` is the engine-space orientation: `true` sweeps
    /// towards increasing angles.
    ///
    /// # Errors
    /// [`SegmentError::ZeroRadiusArc`] when either radius is zero, and
    /// [`SegmentError::NonFiniteArc`] for NaN or infinite parameters.
    pub fn new(
        radius_x: f64,
        radius_y: f64,
        rotation_degrees: f64,
        large_arc: bool,
        sweep: bool,
    ) -> Result<Self, SegmentError> {
        if !radius_x.is_finite() || !radius_y.is_finite() || !rotation_degrees.is_finite() {
            return Err(SegmentError::NonFiniteArc);
        }
        if radius_x == 0.0 || radius_y == 0.0 {
            return Err(SegmentError::ZeroRadiusArc);
        }
        Ok(Self {
            radius_x: radius_x.abs(),
            radius_y: radius_y.abs(),
            rotation_degrees: rotation_degrees % 360.0,
            large_arc,
            sweep,
        })
    }

    #[must_use]
    pub const fn radius_x(&self) -> f64 {
        self.radius_x
    }

    #[must_use]
    pub const fn radius_y(&self) -> f64 {
        self.radius_y
    }

    #[must_use]
    pub const fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    #[must_use]
    pub const fn large_arc(&self) -> bool {
        self.large_arc
    }

    #[must_use]
    pub const fn sweep(&self) -> bool {
        self.sweep
    }

    /// Same arc with both radii multiplied by `scale`.
    #[must_use]
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            radius_x: self.radius_x * scale.abs(),
            radius_y: self.radius_y * scale.abs(),
            ..self
        }
    }

    /// Converts to center form. `None` when the endpoints coincide, in which
    /// case the arc is omitted entirely.
    #[must_use]
    pub fn frame(&self, start: Point2, end: Point2) -> Option<ArcFrame> {
        if start == end {
            return None;
        }

        let phi = self.rotation_degrees.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Midpoint difference in the ellipse's local frame.
        let dx = (start.x - end.x) * 0.5;
        let dy = (start.y - end.y) * 0.5;
        let x1 = cos_phi * dx + sin_phi * dy;
        let y1 = -sin_phi * dx + cos_phi * dy;

        let mut rx = self.radius_x;
        let mut ry = self.radius_y;
        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let grow = lambda.sqrt();
            rx *= grow;
            ry *= grow;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let numerator = rx2 * ry2 - rx2 * y1 * y1 - ry2 * x1 * x1;
        let denominator = rx2 * y1 * y1 + ry2 * x1 * x1;
        let radicand = if denominator > 0.0 {
            (numerator / denominator).max(0.0)
        } else {
            0.0
        };
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let coef = sign * radicand.sqrt();
        let cx1 = coef * (rx * y1 / ry);
        let cy1 = coef * -(ry * x1 / rx);

        let center = Point2::new(
            cos_phi * cx1 - sin_phi * cy1 + (start.x + end.x) * 0.5,
            sin_phi * cx1 + cos_phi * cy1 + (start.y + end.y) * 0.5,
        );

        let start_vec = Vec2::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let end_vec = Vec2::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);
        let start_angle = start_vec.y.atan2(start_vec.x);

        let cross = start_vec.perp_dot(end_vec);
        let mut sweep_angle = cross.atan2(start_vec.dot(end_vec));
        if cross == 0.0 {
            sweep_angle = sweep_angle.abs();
        }
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }
        sweep_angle %= TAU;

        Some(ArcFrame {
            center,
            radius_x: rx,
            radius_y: ry,
            cos_phi,
            sin_phi,
            start_angle,
            sweep_angle,
        })
    }

    #[must_use]
    pub fn point_at(&self, start: Point2, end: Point2, t: f64) -> Point2 {
        match self.frame(start, end) {
            Some(frame) => frame.point_at_angle(frame.angle_at(t)),
            None => start,
        }
    }

    /// Unit tangent at `t`, zero when the arc collapses to a point.
    #[must_use]
    pub fn direction_at(&self, start: Point2, end: Point2, t: f64) -> Vec2 {
        self.frame(start, end)
            .map_or(Vec2::ZERO, |frame| frame.derivative_at(t).normalized_or_zero())
    }
}

impl ArcFrame {
    #[must_use]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sweep_angle * t
    }

    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        let (sin_a, cos_a) = angle.sin_cos();
        let x = self.radius_x * cos_a;
        let y = self.radius_y * sin_a;
        Point2::new(
            self.cos_phi * x - self.sin_phi * y + self.center.x,
            self.sin_phi * x + self.cos_phi * y + self.center.y,
        )
    }

    /// First derivative with respect to `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vec2 {
        let (sin_a, cos_a) = self.angle_at(t).sin_cos();
        let dx = -self.radius_x * sin_a * self.sweep_angle;
        let dy = self.radius_y * cos_a * self.sweep_angle;
        Vec2::new(
            self.cos_phi * dx - self.sin_phi * dy,
            self.sin_phi * dx + self.cos_phi * dy,
        )
    }
}
