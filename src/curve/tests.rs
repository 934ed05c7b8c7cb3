use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use super::*;

fn arc() -> HermiteCurve<f64> {
    HermiteCurve::new(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.2),
        Vector2::new(0.8, 0.6),
        Vector2::new(1.1, -0.3),
    )
}

#[test]
fn endpoints_are_interpolated() {
    let curve = arc();
    let p0 = curve.point_at(0.0);
    let p1 = curve.point_at(1.0);
    assert_relative_eq!(p0, *curve.start(), epsilon = 1e-12);
    assert_relative_eq!(p1, *curve.end(), epsilon = 1e-12);
}

#[test]
fn end_tangents_are_interpolated() {
    let curve = arc();
    assert_relative_eq!(curve.tangent_at(0.0), *curve.start_tangent(), epsilon = 1e-12);
    assert_relative_eq!(curve.tangent_at(1.0), *curve.end_tangent(), epsilon = 1e-12);
}

#[test]
fn tangent_matches_central_difference() {
    let curve = arc();
    let h = 1e-6;
    for i in 1..10 {
        let t = i as f64 / 10.0;
        let numeric = (curve.point_at(t + h) - curve.point_at(t - h)) / (2.0 * h);
        assert_relative_eq!(curve.tangent_at(t), numeric, epsilon = 1e-6);
        let numeric = (curve.tangent_at(t + h) - curve.tangent_at(t - h)) / (2.0 * h);
        assert_relative_eq!(curve.second_derivative_at(t), numeric, epsilon = 1e-6);
    }
}

#[test]
fn straight_curve_is_a_segment() {
    let curve = HermiteCurve::straight(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert_relative_eq!(curve.point_at(t), Point2::new(t, 0.0), epsilon = 1e-12);
    }
    assert_relative_eq!(curve.arc_length(0.0, 1.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(curve.arc_length(0.25, 0.5), 0.25, epsilon = 1e-12);
    assert_relative_eq!(curve.length().unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn simpson_agrees_with_gauss_legendre_on_gentle_arc() {
    let curve = arc();
    let simpson = curve.arc_length(0.0, 1.0);
    let reference = curve.length().unwrap();
    assert_relative_eq!(simpson, reference, max_relative = 1e-2);
}

#[test]
fn arc_length_is_oriented() {
    let curve = arc();
    assert_relative_eq!(curve.arc_length(0.7, 0.2), -curve.arc_length(0.2, 0.7));
    assert_eq!(curve.arc_length(0.4, 0.4), 0.0);
}

#[test]
fn arc_length_gradient_matches_central_difference() {
    let curve = arc();
    let h = 1e-6;
    for &(a, b) in &[(0.0, 1.0), (0.2, 0.9), (0.55, 1.0), (0.1, 0.3)] {
        let (d_a, d_b) = curve.arc_length_gradient(a, b);
        let n_a = (curve.arc_length(a + h, b) - curve.arc_length(a - h, b)) / (2.0 * h);
        let n_b = (curve.arc_length(a, b + h) - curve.arc_length(a, b - h)) / (2.0 * h);
        assert_relative_eq!(d_a, n_a, epsilon = 1e-6);
        assert_relative_eq!(d_b, n_b, epsilon = 1e-6);
    }
}

#[test]
fn unsigned_arc_length_ignores_order() {
    let curve = arc();
    let forward = curve.unsigned_arc_length(0.2, 0.7);
    assert!(forward > 0.0);
    assert_relative_eq!(curve.unsigned_arc_length(0.7, 0.2), forward, epsilon = 1e-15);
    assert_eq!(curve.unsigned_arc_length_gradient(0.4, 0.4), (0.0, 0.0));
}

#[test]
fn unsigned_arc_length_gradient_matches_central_difference() {
    let curve = arc();
    let h = 1e-6;
    for &(a, b) in &[(0.9, 0.1), (0.3, 0.8), (1.0, 0.45)] {
        let (d_a, d_b) = curve.unsigned_arc_length_gradient(a, b);
        let n_a = (curve.unsigned_arc_length(a + h, b) - curve.unsigned_arc_length(a - h, b))
            / (2.0 * h);
        let n_b = (curve.unsigned_arc_length(a, b + h) - curve.unsigned_arc_length(a, b - h))
            / (2.0 * h);
        assert_relative_eq!(d_a, n_a, epsilon = 1e-6);
        assert_relative_eq!(d_b, n_b, epsilon = 1e-6);
    }
}

#[test]
fn lerp_between_points() {
    let p0 = Point2::new(1.0, -1.0);
    let p1 = Point2::new(3.0, 1.0);
    assert_eq!(lerp(0.0, &p0, &p1), p0);
    assert_eq!(lerp(1.0, &p0, &p1), p1);
    assert_eq!(lerp(0.5, &p0, &p1), Point2::new(2.0, 0.0));
}

#[test]
fn basis_partitions_unity() {
    for i in 0..=8 {
        let t = i as f64 / 8.0;
        let b = HermiteBasis::at(t);
        assert_relative_eq!(b.start + b.end, 1.0, epsilon = 1e-12);
        let d = HermiteBasis::derivative_at(t);
        assert_relative_eq!(d.start + d.end, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn try_new_rejects_non_finite() {
    let curve = HermiteCurve::try_new(
        Point2::new(0.0, 0.0),
        Point2::new(f64::NAN, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 0.0),
    );
    assert!(curve.is_err());
}
