use nalgebra::{Point2, Vector2};

use crate::curve::HermiteBasis;
use crate::misc::FloatingPoint;

use super::EdgeEndpoint;

/// Cubic Hermite interpolation of the arrival time along the chord `xA -> xB`.
///
/// The end slopes are the directional derivatives of the known time field
/// along the chord, `dot(gradA, xB - xA)` and `dot(gradB, xB - xA)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HermiteTimeInterpolant<T: FloatingPoint> {
    start_time: T,
    end_time: T,
    start_slope: T,
    end_slope: T,
}

impl<T: FloatingPoint> HermiteTimeInterpolant<T> {
    pub fn new(from: &EdgeEndpoint<T>, to: &EdgeEndpoint<T>) -> Self {
        Self::from_values(
            from.position(),
            to.position(),
            from.time(),
            to.time(),
            from.gradient(),
            to.gradient(),
        )
    }

    pub fn from_values(
        x_a: &Point2<T>,
        x_b: &Point2<T>,
        time_a: T,
        time_b: T,
        gradient_a: &Vector2<T>,
        gradient_b: &Vector2<T>,
    ) -> Self {
        let chord = x_b - x_a;
        Self {
            start_time: time_a,
            end_time: time_b,
            start_slope: gradient_a.dot(&chord),
            end_slope: gradient_b.dot(&chord),
        }
    }

    /// Interpolated arrival time `T(t)`.
    pub fn time_at(&self, t: T) -> T {
        self.blend(HermiteBasis::at(t))
    }

    /// `dT/dt`
    pub fn derivative_at(&self, t: T) -> T {
        self.blend(HermiteBasis::derivative_at(t))
    }

    fn blend(&self, basis: HermiteBasis<T>) -> T {
        basis.blend_scalar(self.start_time, self.start_slope, self.end_time, self.end_slope)
    }
}
