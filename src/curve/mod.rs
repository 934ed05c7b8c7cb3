pub mod hermite_basis;
pub mod hermite_curve;
pub use hermite_basis::*;
pub use hermite_curve::*;

use nalgebra::Point2;

use crate::misc::FloatingPoint;

/// Linear interpolation `(1 - t) * p0 + t * p1`.
pub fn lerp<T: FloatingPoint>(t: T, p0: &Point2<T>, p1: &Point2<T>) -> Point2<T> {
    Point2::from(p0.coords * (T::one() - t) + p1.coords * t)
}

#[cfg(test)]
mod tests;
