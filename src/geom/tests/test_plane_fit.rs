use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{
    PlaneFitError, Point3, Vec3, fit_plane, project_onto_plane, rotate_point_around_pivot,
};

fn coplanar_cloud(rng: &mut StdRng, origin: Point3, a: Vec3, b: Vec3, count: usize) -> Vec<Point3> {
    (0..count)
        .map(|_| {
            let u: f64 = rng.random_range(-5.0..5.0);
            let v: f64 = rng.random_range(-5.0..5.0);
            origin + a * u + b * v
        })
        .collect()
}

#[test]
fn recovers_normal_of_a_tilted_cloud() {
    let mut rng = StdRng::seed_from_u64(7);
    let normal = Vec3::new(1.0, 2.0, 2.0).normalized().unwrap();
    let a = Vec3::new(2.0, -1.0, 0.0).normalized().unwrap();
    let b = normal.cross(a);
    let origin = Point3::new(1.0, 1.0, 1.0);
    let points = coplanar_cloud(&mut rng, origin, a, b, 64);

    let plane = fit_plane(&points).unwrap();
    assert!((plane.normal().dot(normal).abs() - 1.0).abs() < 1e-9);
    for p in &points {
        assert!(plane.signed_distance_to(*p).abs() < 1e-9);
    }
    // The plane passes through (1, 1, 1), so its offset along the normal is 5/3.
    assert!((plane.distance().abs() - 5.0 / 3.0).abs() < 1e-9);
}

#[test]
fn noisy_cloud_stays_close_to_the_true_normal() {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Point3> = (0..200)
        .map(|_| {
            let x: f64 = rng.random_range(-1.0..1.0);
            let y: f64 = rng.random_range(-1.0..1.0);
            let noise: f64 = rng.random_range(-0.01..0.01);
            Point3::new(x, y, 3.0 + noise)
        })
        .collect();
    let plane = fit_plane(&points).unwrap();
    assert!(plane.normal().dot(Vec3::Z).abs() > 0.999);
}

#[test]
fn rejects_too_few_and_collinear_points() {
    let err = fit_plane(&[Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)]).unwrap_err();
    assert_eq!(
        err,
        PlaneFitError::InsufficientPoints {
            provided: 2,
            required: 3
        }
    );

    let line: Vec<Point3> = (0..10)
        .map(|i| {
            let t = f64::from(i);
            Point3::new(t, 2.0 * t, -t)
        })
        .collect();
    assert_eq!(fit_plane(&line).unwrap_err(), PlaneFitError::Degenerate);

    let stacked = vec![Point3::new(1.0, 1.0, 1.0); 5];
    assert_eq!(fit_plane(&stacked).unwrap_err(), PlaneFitError::Degenerate);
}

#[test]
fn projection_preserves_in_plane_distances() {
    let mut rng = StdRng::seed_from_u64(3);
    let pivot = Point3::new(0.5, -2.0, 4.0);
    let flat: Vec<Point3> = (0..20)
        .map(|_| {
            let x: f64 = rng.random_range(-3.0..3.0);
            let y: f64 = rng.random_range(-3.0..3.0);
            Point3::new(x, y, 0.0) + pivot.to_vec3()
        })
        .collect();
    let tilted: Vec<Point3> = flat
        .iter()
        .map(|p| rotate_point_around_pivot(*p, pivot, Vec3::new(0.4, -0.7, 1.1)))
        .collect();

    let plane = fit_plane(&tilted).unwrap();
    let projected = project_onto_plane(&tilted, &plane);
    assert_eq!(projected.len(), tilted.len());

    for i in 0..tilted.len() {
        for j in (i + 1)..tilted.len() {
            let expected = tilted[i].distance_to(tilted[j]);
            let actual = projected[i].distance_to(projected[j]);
            assert!((expected - actual).abs() < 1e-9, "pair ({i}, {j})");
        }
    }

    let sum = projected
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    assert!(sum.0.abs() < 1e-9 && sum.1.abs() < 1e-9);
}
