//! Small helpers on top of nalgebra's 2D vectors.
//!
//! `norm`, `dot`, scaling, addition and subtraction come straight from
//! [`nalgebra::Vector2`]; what lives here are the pieces the update objectives
//! share when differentiating distance terms.

use nalgebra::{Point2, SVector, Vector2};

use super::FloatingPoint;

/// Rate of change of `‖diff‖` when `diff` moves along `d_diff`,
/// i.e. `dot(diff, d_diff) / ‖diff‖`.
///
/// The distance is not differentiable where `diff` vanishes. Zero is returned
/// there, which belongs to its subdifferential.
pub fn distance_rate<T: FloatingPoint>(diff: &Vector2<T>, d_diff: &Vector2<T>) -> T {
    let norm = diff.norm();
    if norm <= T::default_epsilon() {
        T::zero()
    } else {
        diff.dot(d_diff) / norm
    }
}

/// Unit vector pointing from `from` to `to`, or `None` if the points coincide.
pub fn unit_direction<T: FloatingPoint>(from: &Point2<T>, to: &Point2<T>) -> Option<Vector2<T>> {
    let d = to - from;
    let norm = d.norm();
    (norm > T::default_epsilon()).then(|| d / norm)
}

/// Check if two points coincide up to machine precision.
pub fn is_coincident<T: FloatingPoint>(a: &Point2<T>, b: &Point2<T>) -> bool {
    (a - b).norm() <= T::default_epsilon()
}

/// Check if every component of a point is finite.
pub fn is_finite_point<T: FloatingPoint>(p: &Point2<T>) -> bool {
    p.coords.iter().all(|v| v.is_finite())
}

/// Check if every component of a vector is finite.
pub fn is_finite_vector<T: FloatingPoint, const D: usize>(v: &SVector<T, D>) -> bool {
    v.iter().all(|c| c.is_finite())
}
