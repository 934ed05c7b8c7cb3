#![cfg(feature = "serde")]

use hermite_eikonal::prelude::*;
use nalgebra::{Point2, Vector2};

#[test]
fn test_serialization() {
    let curve = HermiteCurve::new(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.5),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, -0.5),
    );
    let json = serde_json::to_string_pretty(&curve).unwrap();
    let back: HermiteCurve<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, curve);

    let endpoint = EdgeEndpoint::new(Point2::new(1.0, 2.0), 0.5, Vector2::new(0.0, 1.0))
        .with_tangent(Vector2::new(1.0, 0.0));
    let json = serde_json::to_string(&endpoint).unwrap();
    let back: EdgeEndpoint<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, endpoint);

    let domain = ParameterBox::try_rectangle((0.0, 1.0), (0.25, 0.75)).unwrap();
    let json = serde_json::to_string(&domain).unwrap();
    let back: ParameterBox<f64, 2> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, domain);
}

#[test]
fn test_solution_serialization() {
    let from = EdgeEndpoint::new(Point2::new(0.0, 0.0), 0.0, Vector2::new(1.0, 0.0));
    let to = EdgeEndpoint::new(Point2::new(2.0, 0.0), 2.0, Vector2::new(1.0, 0.0));
    let update = FreeSpaceUpdate::try_new(&from, &to, Point2::new(1.0, 1.0), 1.0).unwrap();
    let solution = update
        .solve(0.0, &ParameterBox::unit(), &UpdateOptions::default())
        .unwrap();
    let json = serde_json::to_string(&solution).unwrap();
    let back: UpdateSolution<f64, 1> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.status(), solution.status());
    assert_eq!(back.param(), solution.param());
}
