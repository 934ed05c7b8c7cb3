use nalgebra::SVector;

use crate::error::UpdateError;

use super::FloatingPoint;

/// Axis aligned box `[lower, upper]` constraining the interpolation parameters
/// of an update. Both bounds are inclusive.
///
/// # Invariants
/// `lower[i] <= upper[i]` for every component, and all bounds are finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterBox<T: FloatingPoint, const D: usize> {
    lower: SVector<T, D>,
    upper: SVector<T, D>,
}

impl<T: FloatingPoint, const D: usize> ParameterBox<T, D> {
    /// Create a box from its lower and upper corners.
    ///
    /// # Errors
    /// Returns [`UpdateError::InvalidInput`] if a bound is not finite or if
    /// `lower > upper` on any axis.
    pub fn try_new(lower: SVector<T, D>, upper: SVector<T, D>) -> Result<Self, UpdateError> {
        for i in 0..D {
            let (lo, hi) = (lower[i], upper[i]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(UpdateError::invalid_input(format!(
                    "parameter bounds must be finite, got [{}, {}] on axis {}",
                    lo.as_f64(),
                    hi.as_f64(),
                    i
                )));
            }
            if lo > hi {
                return Err(UpdateError::invalid_input(format!(
                    "lower bound {} exceeds upper bound {} on axis {}",
                    lo.as_f64(),
                    hi.as_f64(),
                    i
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// The unit box `[0, 1]^D`.
    pub fn unit() -> Self {
        Self {
            lower: SVector::zeros(),
            upper: SVector::repeat(T::one()),
        }
    }

    pub fn lower(&self) -> &SVector<T, D> {
        &self.lower
    }

    pub fn upper(&self) -> &SVector<T, D> {
        &self.upper
    }

    /// Clamp each component of `param` into its interval.
    /// Values above the upper bound become exactly the upper bound, values
    /// below the lower bound exactly the lower bound.
    pub fn project(&self, param: &SVector<T, D>) -> SVector<T, D> {
        SVector::from_fn(|i, _| {
            let v = param[i];
            if v < self.lower[i] {
                self.lower[i]
            } else if v > self.upper[i] {
                self.upper[i]
            } else {
                v
            }
        })
    }

    /// Check if `param` lies inside the box, boundary included.
    pub fn contains(&self, param: &SVector<T, D>) -> bool {
        (0..D).all(|i| self.lower[i] <= param[i] && param[i] <= self.upper[i])
    }

    /// Check if this box lies inside `other`.
    pub fn is_within(&self, other: &Self) -> bool {
        other.contains(&self.lower) && other.contains(&self.upper)
    }
}

impl<T: FloatingPoint> ParameterBox<T, 1> {
    /// Interval `[min, max]` for a single interpolation parameter.
    pub fn try_interval(min: T, max: T) -> Result<Self, UpdateError> {
        Self::try_new(SVector::from([min]), SVector::from([max]))
    }
}

impl<T: FloatingPoint> ParameterBox<T, 2> {
    /// Rectangle `[lambda_min, lambda_max] x [mu_min, mu_max]`.
    pub fn try_rectangle(lambda: (T, T), mu: (T, T)) -> Result<Self, UpdateError> {
        Self::try_new(
            SVector::from([lambda.0, mu.0]),
            SVector::from([lambda.1, mu.1]),
        )
    }
}
