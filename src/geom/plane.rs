//! Best-fit planes for freehand strokes.
//!
//! A stroke drawn in the air is never perfectly flat. [`fit_plane`] finds the
//! least-squares plane through the samples by solving the normal equations on
//! the best-conditioned pair of axes, and [`project_onto_plane`] flattens the
//! stroke into that plane's local 2D frame.

use thiserror::Error;

use super::core::{Point2, Point3, Tolerance, Transform, Vec3, centroid, centroid_2d};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaneFitError {
    /// Not enough points provided for plane fitting.
    #[error("at least three points required ({provided} provided, {required} required)")]
    InsufficientPoints { provided: usize, required: usize },
    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    /// Points are collinear or coincident.
    #[error("points do not span a plane")]
    Degenerate,
}

// ============================================================================
// Plane
// ============================================================================

/// A plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    origin: Point3,
}

impl Plane {
    /// Builds a plane from any non-zero normal.
    #[must_use]
    pub fn new(normal: Vec3, origin: Point3) -> Option<Self> {
        Some(Self {
            normal: normal.normalized()?,
            origin,
        })
    }

    #[must_use]
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    #[must_use]
    pub const fn origin(&self) -> Point3 {
        self.origin
    }

    /// Signed distance of the plane from the world origin along its normal.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.normal.dot(self.origin.to_vec3())
    }

    #[must_use]
    pub fn signed_distance_to(&self, p: Point3) -> f64 {
        self.normal.dot(p.sub_point(self.origin))
    }

    /// Orthogonal projection of `p` onto the plane.
    #[must_use]
    pub fn project_point(&self, p: Point3) -> Point3 {
        p - self.normal * self.signed_distance_to(p)
    }

    /// Euler angles `(pitch, yaw, 0)` in radians of a rotation that turns +Z
    /// onto the normal.
    #[must_use]
    pub fn euler_angles(&self) -> Vec3 {
        let n = self.normal;
        let yaw = n.x.atan2(n.z);
        let pitch = (-n.y).atan2(n.x.hypot(n.z));
        Vec3::new(pitch, yaw, 0.0)
    }

    /// Rotation that undoes [`Plane::euler_angles`] (z, then y, then x) so the
    /// normal maps onto +Z.
    #[must_use]
    pub fn flattening_transform(&self) -> Transform {
        let angles = self.euler_angles();
        Transform::rotate_x(-angles.x)
            .compose(Transform::rotate_y(-angles.y))
            .compose(Transform::rotate_z(-angles.z))
    }
}

// ============================================================================
// Fitting
// ============================================================================

/// Least-squares plane through `points`.
///
/// # Errors
/// [`PlaneFitError::InsufficientPoints`] below three points,
/// [`PlaneFitError::NonFinitePoint`] for NaN/infinite input and
/// [`PlaneFitError::Degenerate`] when the points are collinear or coincident.
pub fn fit_plane(points: &[Point3]) -> Result<Plane, PlaneFitError> {
    if points.len() < 3 {
        return Err(PlaneFitError::InsufficientPoints {
            provided: points.len(),
            required: 3,
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(PlaneFitError::NonFinitePoint { index });
    }
    let center = centroid(points).ok_or(PlaneFitError::Degenerate)?;

    let (mut xx, mut xy, mut xz, mut yy, mut yz, mut zz) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    for p in points {
        let r = p.sub_point(center);
        xx += r.x * r.x;
        xy += r.x * r.y;
        xz += r.x * r.z;
        yy += r.y * r.y;
        yz += r.y * r.z;
        zz += r.z * r.z;
    }

    let det_x = yy * zz - yz * yz;
    let det_y = xx * zz - xz * xz;
    let det_z = xx * yy - xy * xy;
    let det_max = det_x.max(det_y).max(det_z);

    // Relative to the spread so that rounding noise on collinear input is rejected.
    let spread = xx + yy + zz;
    if !(det_max > Tolerance::DEFAULT.eps * spread * spread) {
        return Err(PlaneFitError::Degenerate);
    }

    let direction = if det_max == det_x {
        Vec3::new(1.0, (xz * yz - xy * zz) / det_x, (xy * yz - xz * yy) / det_x)
    } else if det_max == det_y {
        Vec3::new((yz * xz - xy * zz) / det_y, 1.0, (xy * xz - yz * xx) / det_y)
    } else {
        Vec3::new((yz * xy - xz * yy) / det_z, (xz * xy - yz * xx) / det_z, 1.0)
    };

    let plane = Plane::new(direction, center).ok_or(PlaneFitError::Degenerate)?;
    log::debug!(
        "fitted plane through {} points: normal=({:.4}, {:.4}, {:.4})",
        points.len(),
        plane.normal.x,
        plane.normal.y,
        plane.normal.z
    );
    Ok(plane)
}

/// Projects `points` onto `plane`, rotates them into the plane's local frame
/// and recenters them on their own centroid.
#[must_use]
pub fn project_onto_plane(points: &[Point3], plane: &Plane) -> Vec<Point2> {
    let pivot = plane.origin();
    let flatten = plane.flattening_transform();

    let flat: Vec<Point2> = points
        .iter()
        .map(|p| {
            let local = flatten.apply_vec(plane.project_point(*p).sub_point(pivot));
            Point2::new(local.x, local.y)
        })
        .collect();

    let Some(center) = centroid_2d(&flat) else {
        return flat;
    };
    flat.into_iter()
        .map(|p| Point2::new(p.x - center.x, p.y - center.y))
        .collect()
}
