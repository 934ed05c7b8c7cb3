use nalgebra::Vector2;

use crate::misc::FloatingPoint;

/// The four cubic Hermite basis functions (or one of their derivatives)
/// evaluated at a single parameter.
///
/// `start`, `start_tangent`, `end`, `end_tangent` are the weights of
/// `p0`, `m0`, `p1`, `m1` respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HermiteBasis<T> {
    pub start: T,
    pub start_tangent: T,
    pub end: T,
    pub end_tangent: T,
}

impl<T: FloatingPoint> HermiteBasis<T> {
    /// `2t^3 - 3t^2 + 1`, `t^3 - 2t^2 + t`, `-2t^3 + 3t^2`, `t^3 - t^2`
    pub fn at(t: T) -> Self {
        let two = T::constant(2.0);
        let three = T::constant(3.0);
        let t2 = t * t;
        let t3 = t2 * t;
        Self {
            start: two * t3 - three * t2 + T::one(),
            start_tangent: t3 - two * t2 + t,
            end: -two * t3 + three * t2,
            end_tangent: t3 - t2,
        }
    }

    /// First derivative of the basis with respect to `t`.
    pub fn derivative_at(t: T) -> Self {
        let two = T::constant(2.0);
        let three = T::constant(3.0);
        let four = T::constant(4.0);
        let six = T::constant(6.0);
        let t2 = t * t;
        Self {
            start: six * t2 - six * t,
            start_tangent: three * t2 - four * t + T::one(),
            end: -six * t2 + six * t,
            end_tangent: three * t2 - two * t,
        }
    }

    /// Second derivative of the basis with respect to `t`.
    pub fn second_derivative_at(t: T) -> Self {
        let two = T::constant(2.0);
        let four = T::constant(4.0);
        let six = T::constant(6.0);
        let twelve = T::constant(12.0);
        Self {
            start: twelve * t - six,
            start_tangent: six * t - four,
            end: -twelve * t + six,
            end_tangent: six * t - two,
        }
    }

    /// Weighted sum of two vectors and their tangents.
    pub fn blend(
        &self,
        p0: &Vector2<T>,
        m0: &Vector2<T>,
        p1: &Vector2<T>,
        m1: &Vector2<T>,
    ) -> Vector2<T> {
        p0 * self.start + m0 * self.start_tangent + p1 * self.end + m1 * self.end_tangent
    }

    /// Weighted sum of two scalar values and their slopes.
    pub fn blend_scalar(&self, v0: T, s0: T, v1: T, s1: T) -> T {
        v0 * self.start + s0 * self.start_tangent + v1 * self.end + s1 * self.end_tangent
    }
}
