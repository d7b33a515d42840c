mod arc;
mod cache;
mod core;
mod plane;
mod segment;
mod shape;

pub use arc::{ArcFrame, EllipticalArc};
pub use cache::{PointCache, PointCacheStats, SharedPoints};
pub use self::core::{
    BBox, Point2, Point3, Tolerance, Transform, Vec2, Vec3, bounds_2d, centroid, centroid_2d,
    rotate_point_around_pivot,
};
pub use plane::{Plane, PlaneFitError, fit_plane, project_onto_plane};
pub use segment::{LENGTH_SAMPLES, PathSegment, Positioning, SegmentError, SegmentKind};
pub use shape::{Path, PlacedSegment, Shape, ShapeError};

#[cfg(test)]
mod tests;
