use gauss_quad::GaussLegendre;
use nalgebra::{Point2, Vector2};

use crate::error::UpdateError;
use crate::misc::{distance_rate, is_finite_point, is_finite_vector, FloatingPoint};

use super::HermiteBasis;

/// Number of Gauss-Legendre nodes used for the reference length of a cubic.
const GAUSS_LEGENDRE_NODES: usize = 16 + 3;

/// Cubic Hermite curve on `t in [0, 1]` defined by two end points and the
/// tangent ("B" vector) at each of them.
///
/// Used to represent curved pieces of the domain boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HermiteCurve<T: FloatingPoint> {
    start: Point2<T>,
    end: Point2<T>,
    start_tangent: Vector2<T>,
    end_tangent: Vector2<T>,
}

impl<T: FloatingPoint> HermiteCurve<T> {
    pub fn new(
        start: Point2<T>,
        end: Point2<T>,
        start_tangent: Vector2<T>,
        end_tangent: Vector2<T>,
    ) -> Self {
        Self {
            start,
            end,
            start_tangent,
            end_tangent,
        }
    }

    /// Create a curve and check that every coordinate is finite.
    pub fn try_new(
        start: Point2<T>,
        end: Point2<T>,
        start_tangent: Vector2<T>,
        end_tangent: Vector2<T>,
    ) -> Result<Self, UpdateError> {
        let curve = Self::new(start, end, start_tangent, end_tangent);
        curve.validate()?;
        Ok(curve)
    }

    /// Hermite curve tracing the segment `start -> end` at constant speed.
    pub fn straight(start: Point2<T>, end: Point2<T>) -> Self {
        let chord = end - start;
        Self::new(start, end, chord, chord)
    }

    pub fn start(&self) -> &Point2<T> {
        &self.start
    }

    pub fn end(&self) -> &Point2<T> {
        &self.end
    }

    pub fn start_tangent(&self) -> &Vector2<T> {
        &self.start_tangent
    }

    pub fn end_tangent(&self) -> &Vector2<T> {
        &self.end_tangent
    }

    pub(crate) fn validate(&self) -> Result<(), UpdateError> {
        let finite = is_finite_point(&self.start)
            && is_finite_point(&self.end)
            && is_finite_vector(&self.start_tangent)
            && is_finite_vector(&self.end_tangent);
        if finite {
            Ok(())
        } else {
            Err(UpdateError::invalid_input(
                "hermite curve coordinates must be finite",
            ))
        }
    }

    fn blend(&self, basis: HermiteBasis<T>) -> Vector2<T> {
        basis.blend(
            &self.start.coords,
            &self.start_tangent,
            &self.end.coords,
            &self.end_tangent,
        )
    }

    /// Evaluate the curve at parameter `t`.
    pub fn point_at(&self, t: T) -> Point2<T> {
        Point2::from(self.blend(HermiteBasis::at(t)))
    }

    /// First derivative `C'(t)`.
    pub fn tangent_at(&self, t: T) -> Vector2<T> {
        self.blend(HermiteBasis::derivative_at(t))
    }

    /// Second derivative `C''(t)`.
    pub fn second_derivative_at(&self, t: T) -> Vector2<T> {
        self.blend(HermiteBasis::second_derivative_at(t))
    }

    /// Speed `‖C'(t)‖`.
    fn speed_at(&self, t: T) -> T {
        self.tangent_at(t).norm()
    }

    /// Derivative of the speed with respect to `t`.
    fn speed_rate_at(&self, t: T) -> T {
        distance_rate(&self.tangent_at(t), &self.second_derivative_at(t))
    }

    /// Arc length between parameters `a` and `b` by Simpson's rule on three
    /// samples: `(b - a) / 6 * (‖C'(a)‖ + 4‖C'(m)‖ + ‖C'(b)‖)`.
    ///
    /// Callers pass `a < b`; swapping them negates the result.
    pub fn arc_length(&self, a: T, b: T) -> T {
        let six = T::constant(6.0);
        let four = T::constant(4.0);
        let mid = (a + b) * T::constant(0.5);
        (b - a) / six * (self.speed_at(a) + four * self.speed_at(mid) + self.speed_at(b))
    }

    /// Partial derivatives `(dL/da, dL/db)` of [`Self::arc_length`].
    pub fn arc_length_gradient(&self, a: T, b: T) -> (T, T) {
        let six = T::constant(6.0);
        let two = T::constant(2.0);
        let four = T::constant(4.0);
        let mid = (a + b) * T::constant(0.5);
        let sum = self.speed_at(a) + four * self.speed_at(mid) + self.speed_at(b);
        let width = (b - a) / six;
        // d(mid)/da = d(mid)/db = 1/2, which turns the weight 4 into 2
        let mid_rate = two * self.speed_rate_at(mid);
        let d_a = -sum / six + width * (self.speed_rate_at(a) + mid_rate);
        let d_b = sum / six + width * (mid_rate + self.speed_rate_at(b));
        (d_a, d_b)
    }

    /// Simpson arc length between `a` and `b` in either order.
    pub fn unsigned_arc_length(&self, a: T, b: T) -> T {
        if b < a {
            self.arc_length(b, a)
        } else {
            self.arc_length(a, b)
        }
    }

    /// Partial derivatives of [`Self::unsigned_arc_length`].
    ///
    /// `a == b` is a kink; zero is returned there.
    pub fn unsigned_arc_length_gradient(&self, a: T, b: T) -> (T, T) {
        if a == b {
            return (T::zero(), T::zero());
        }
        let (d_a, d_b) = self.arc_length_gradient(a, b);
        if b < a {
            (-d_a, -d_b)
        } else {
            (d_a, d_b)
        }
    }

    /// Length of the whole curve by Gauss-Legendre quadrature.
    pub fn length(&self) -> Result<T, UpdateError> {
        let gauss = GaussLegendre::new(GAUSS_LEGENDRE_NODES)
            .map_err(|e| UpdateError::Solver(anyhow::Error::new(e)))?;
        let sum = gauss.integrate(0.0, 1.0, |x| self.speed_at(T::constant(x)).as_f64());
        Ok(T::constant(sum))
    }
}
