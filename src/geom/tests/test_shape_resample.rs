use crate::geom::{Path, PathSegment, Point2, SegmentKind, Shape, ShapeError, Tolerance};

fn polyline(points: &[(f64, f64)]) -> Path {
    let mut segments = Vec::with_capacity(points.len());
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        segments.push(PathSegment::absolute(SegmentKind::Move {
            to: Point2::new(x, y),
        }));
    }
    for &(x, y) in iter {
        segments.push(PathSegment::absolute(SegmentKind::Line {
            to: Point2::new(x, y),
        }));
    }
    Path::new(segments)
}

fn normalized(points: &[(f64, f64)]) -> Shape {
    Shape::from(polyline(points)).normalized().unwrap()
}

#[test]
fn normalize_centers_and_fits_the_longer_side() {
    let shape = normalized(&[(10.0, 20.0), (30.0, 20.0), (30.0, 30.0)]);
    let bbox = shape.extents().unwrap();
    let tol = Tolerance::new(1e-12);
    assert!(tol.approx_eq_f64(bbox.min.x, -0.5));
    assert!(tol.approx_eq_f64(bbox.max.x, 0.5));
    assert!(tol.approx_eq_f64(bbox.min.y, -0.25));
    assert!(tol.approx_eq_f64(bbox.max.y, 0.25));
}

#[test]
fn normalize_rejects_empty_and_point_shapes() {
    assert_eq!(Shape::default().normalized().unwrap_err(), ShapeError::Empty);
    let dot = Shape::from(polyline(&[(3.0, 3.0)]));
    assert_eq!(dot.normalized().unwrap_err(), ShapeError::Degenerate);
}

#[test]
fn straight_line_samples_are_evenly_spaced() {
    let shape = normalized(&[(0.0, 0.0), (10.0, 0.0)]);
    let points = shape.resample(0.1).unwrap();
    assert_eq!(points.len(), 11);
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point2(points[0], Point2::new(-0.5, 0.0)));
    assert!(tol.approx_eq_point2(points[10], Point2::new(0.5, 0.0)));
    for pair in points.windows(2) {
        assert!(tol.approx_eq_f64(pair[0].distance_to(pair[1]), 0.1));
    }
}

#[test]
fn step_is_adjusted_to_divide_the_length() {
    // Two unit legs: 2 / 0.3 rounds to 7 intervals.
    let shape = normalized(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let points = shape.resample(0.3).unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(shape.resample(0.05).unwrap().len(), 41);
}

#[test]
fn closed_outline_does_not_repeat_its_start() {
    let shape = normalized(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0),
    ]);
    let points = shape.resample(0.05).unwrap();
    assert_eq!(points.len(), 80);
    let first = points[0];
    assert!(
        points[1..]
            .iter()
            .all(|p| p.distance_to(first) > Tolerance::SAMPLE_MERGE.eps)
    );
}

#[test]
fn resample_rejects_bad_steps_and_lengthless_shapes() {
    let shape = normalized(&[(0.0, 0.0), (10.0, 0.0)]);
    for step in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            shape.resample(step),
            Err(ShapeError::InvalidStep { .. })
        ));
    }
    let moves_only = Shape::from(polyline(&[(1.0, 1.0)]));
    assert_eq!(moves_only.resample(0.1).unwrap_err(), ShapeError::ZeroLength);
}

#[test]
fn cursor_carries_across_paths() {
    let first = polyline(&[(0.0, 0.0), (1.0, 0.0)]);
    let second = Path::new(vec![PathSegment::relative(SegmentKind::Line {
        to: Point2::new(0.0, 1.0),
    })]);
    let shape = Shape::new(vec![first, second]);
    let placed = shape.placed_segments();
    assert_eq!(placed.len(), 3);
    assert_eq!(placed[2].start, Point2::new(1.0, 0.0));
    assert!((shape.length() - 2.0).abs() < 1e-9);
}

#[test]
fn trailing_move_adds_no_sample() {
    let mut path = polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    path.segments.push(PathSegment::absolute(SegmentKind::Move {
        to: Point2::new(5.0, 0.0),
    }));
    let points = Shape::from(path).normalized().unwrap().resample(0.1).unwrap();
    assert_eq!(points.len(), 11);
    assert!(Tolerance::new(1e-9).approx_eq_point2(points[10], Point2::new(0.5, 0.0)));
}

#[test]
fn fine_steps_keep_the_samples_next_to_the_start() {
    let shape = normalized(&[(0.0, 0.0), (10.0, 0.0)]);
    let points = shape.resample(0.005).unwrap();
    assert_eq!(points.len(), 201);
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_point2(points[1], Point2::new(-0.495, 0.0)));
    for pair in points.windows(2) {
        assert!(tol.approx_eq_f64(pair[0].distance_to(pair[1]), 0.005));
    }

    let zigzag = normalized(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)]);
    let length = zigzag.length();
    let expected = (length / 0.0013).round() as usize + 1;
    assert_eq!(zigzag.resample(0.0013).unwrap().len(), expected);
}
