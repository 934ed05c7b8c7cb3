use approx::assert_relative_eq;
use hermite_eikonal::prelude::*;
use nalgebra::{Point2, Vector2};

/// Straight boundary edge `(0,0) -> (1,0)` with target `(0.5, 1)`.
fn straight_edge(t0: f64, t1: f64, grad: Vector2<f64>) -> EdgeUpdate<f64> {
    let b = Vector2::new(1.0, 0.0);
    let x0 = EdgeEndpoint::new(Point2::new(0.0, 0.0), t0, grad).with_tangent(b);
    let x1 = EdgeEndpoint::new(Point2::new(1.0, 0.0), t1, grad).with_tangent(b);
    EdgeUpdate::try_new(&x0, &x1, Point2::new(0.5, 1.0), 1.0).unwrap()
}

#[test]
fn boundary_edge_with_linear_time() {
    // T(λ) = λ grows as fast as the distance can shrink, so leaving from x0 wins
    let update = straight_edge(0.0, 1.0, Vector2::new(1.0, 0.0));
    let options = UpdateOptions::default().with_tolerance(1e-8).with_max_iters(50);
    let solution = update.solve(0.5, &options).unwrap();
    assert_eq!(solution.lambda(), 0.0);
    assert_relative_eq!(solution.arrival_time(), 1.25f64.sqrt(), epsilon = 1e-12);
    assert!(solution.is_converged());

    let g = solution.arrival_gradient().unwrap();
    assert_relative_eq!(*g, Vector2::new(0.5, 1.0) / 1.25f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn boundary_edge_symmetric() {
    let update = straight_edge(0.0, 0.0, Vector2::zeros());
    let options = UpdateOptions::default().with_tolerance(1e-8).with_max_iters(50);
    let solution = update.solve(0.0, &options).unwrap();
    assert_relative_eq!(solution.lambda(), 0.5, epsilon = 1e-4);
    assert_relative_eq!(solution.arrival_time(), 1.0, epsilon = 1e-6);
    assert_eq!(solution.status(), UpdateStatus::MaxIterationsReached);
    assert_eq!(solution.gradient_evaluations(), 50);
}

#[test]
fn free_space_target_on_chord() {
    let grad = Vector2::new(1.0, 0.0);
    let from = EdgeEndpoint::new(Point2::new(0.0, 0.0), 0.0, grad);
    let to = EdgeEndpoint::new(Point2::new(2.0, 0.0), 2.0, grad);
    let update = FreeSpaceUpdate::try_new(&from, &to, Point2::new(1.0, 0.0), 2.0).unwrap();
    let solution = update
        .solve(0.0, &ParameterBox::unit(), &UpdateOptions::default())
        .unwrap();
    assert_eq!(solution.lambda(), 0.5);
    assert_eq!(solution.arrival_time(), 1.0);
    assert_eq!(
        solution.status(),
        UpdateStatus::Converged(ConvergenceReason::Stalled)
    );
    assert!(solution.arrival_gradient().is_none());
}

#[test]
fn free_space_single_precision() {
    let grad = Vector2::new(1.0f32, 0.0);
    let from = EdgeEndpoint::new(Point2::new(0.0f32, 0.0), 0.0, grad);
    let to = EdgeEndpoint::new(Point2::new(2.0f32, 0.0), 2.0, grad);
    let update = FreeSpaceUpdate::try_new(&from, &to, Point2::new(1.0, 0.0), 2.0).unwrap();
    let solution = update
        .solve(0.0, &ParameterBox::unit(), &UpdateOptions::default())
        .unwrap();
    assert_eq!(solution.lambda(), 0.5);
    assert_eq!(solution.arrival_time(), 1.0);
}

fn two_step(mirror: f64) -> TwoStepUpdate<f64> {
    let p = |x: f64, y: f64| Point2::new(x, mirror * y);
    let v = |x: f64, y: f64| Vector2::new(x, mirror * y);
    let x0 = EdgeEndpoint::new(p(0.0, 0.0), 0.0, v(1.0, 0.2)).with_tangent(v(0.3, 1.2));
    let x1 = EdgeEndpoint::new(p(1.0, 0.0), 1.0, v(0.9, 0.3));
    let x2 = EdgeEndpoint::new(p(0.0, 1.2), 1.4, v(0.5, 0.9)).with_tangent(v(-0.2, 1.0));
    TwoStepUpdate::try_new(&x0, &x1, &x2, p(1.4, 1.5), 1.0, 1.0).unwrap()
}

#[test]
fn two_step_mirror_symmetry() {
    let options = UpdateOptions::default();
    let domain = ParameterBox::unit();
    let upper = two_step(1.0).solve(&domain, &options).unwrap();
    let lower = two_step(-1.0).solve(&domain, &options).unwrap();
    assert_relative_eq!(upper.lambda(), lower.lambda(), epsilon = 1e-12);
    assert_relative_eq!(upper.mu(), lower.mu(), epsilon = 1e-12);
    assert_relative_eq!(upper.arrival_time(), lower.arrival_time(), epsilon = 1e-12);

    let gu = upper.arrival_gradient().unwrap();
    let gl = lower.arrival_gradient().unwrap();
    assert_relative_eq!(gu.x, gl.x, epsilon = 1e-12);
    assert_relative_eq!(gu.y, -gl.y, epsilon = 1e-12);
}

#[test]
fn creeping_ray_along_straight_boundary() {
    let grad = Vector2::new(0.0, 1.0);
    let from = EdgeEndpoint::new(Point2::new(0.0, 0.0), 0.0, grad);
    let to = EdgeEndpoint::new(Point2::new(0.0, 1.0), 1.0, grad);
    let boundary = HermiteCurve::straight(Point2::new(1.0, 0.0), Point2::new(3.0, 0.0));
    let update = CreepingRayUpdate::try_new(&from, &to, boundary, 1.0).unwrap();
    let solution = update
        .solve(&ParameterBox::unit(), &UpdateOptions::default())
        .unwrap();
    assert_eq!(solution.lambda(), 0.0);
    assert_relative_eq!(solution.arrival_time(), 3.0, epsilon = 1e-9);
    assert_relative_eq!(
        *solution.arrival_gradient().unwrap(),
        Vector2::new(1.0, 0.0),
        epsilon = 1e-12
    );
}
