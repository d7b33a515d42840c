//! Freehand strokes: 3D samples in, unit-box 2D points out.

use crate::geom::{PlaneFitError, Point2, Point3, bounds_2d, fit_plane, project_onto_plane};

/// Centers `points` on the origin and scales the longer side of their bounds
/// to 1, the same framing sigil outlines get. Degenerate input (all points on
/// one spot) is only recentered.
#[must_use]
pub fn fit_to_unit_box(points: &[Point2]) -> Vec<Point2> {
    let Some((min, max)) = bounds_2d(points) else {
        return Vec::new();
    };
    let width = max.x - min.x;
    let height = max.y - min.y;
    let extent = width.max(height);
    let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };
    let cx = min.x + width * 0.5;
    let cy = min.y + height * 0.5;
    points
        .iter()
        .map(|p| Point2::new((p.x - cx) * scale, (p.y - cy) * scale))
        .collect()
}

/// Flattens a drawn stroke onto its best-fit plane and frames it in the unit box.
///
/// # Errors
/// Propagates [`PlaneFitError`] for strokes that do not span a plane.
pub fn flatten_stroke(points: &[Point3]) -> Result<Vec<Point2>, PlaneFitError> {
    let plane = fit_plane(points)?;
    Ok(fit_to_unit_box(&project_onto_plane(points, &plane)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Tolerance;

    #[test]
    fn unit_box_keeps_aspect_ratio() {
        let framed = fit_to_unit_box(&[
            Point2::new(10.0, 10.0),
            Point2::new(14.0, 10.0),
            Point2::new(14.0, 12.0),
        ]);
        assert_eq!(framed[0], Point2::new(-0.5, -0.25));
        assert_eq!(framed[1], Point2::new(0.5, -0.25));
        assert_eq!(framed[2], Point2::new(0.5, 0.25));
    }

    #[test]
    fn unit_box_of_a_single_spot_is_centered() {
        let framed = fit_to_unit_box(&[Point2::new(3.0, 4.0), Point2::new(3.0, 4.0)]);
        assert_eq!(framed, vec![Point2::ORIGIN, Point2::ORIGIN]);
        assert!(fit_to_unit_box(&[]).is_empty());
    }

    #[test]
    fn flatten_preserves_shape_of_tilted_stroke() {
        // A 2x1 rectangle outline standing in the x = 5 plane.
        let stroke = [
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 2.0),
            Point3::new(5.0, 1.0, 2.0),
            Point3::new(5.0, 1.0, 0.0),
        ];
        let flat = flatten_stroke(&stroke).unwrap();
        assert_eq!(flat.len(), 4);

        let side = |a: usize, b: usize| flat[a].distance_to(flat[b]);
        assert!(Tolerance::LOOSE.approx_eq_f64(side(0, 1), 1.0));
        assert!(Tolerance::LOOSE.approx_eq_f64(side(1, 2), 0.5));
        assert!(Tolerance::LOOSE.approx_eq_f64(side(2, 3), 1.0));
    }

    #[test]
    fn collinear_strokes_fail() {
        let stroke = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        assert_eq!(flatten_stroke(&stroke), Err(PlaneFitError::Degenerate));
    }
}
