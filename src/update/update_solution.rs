use nalgebra::{SVector, Vector2};

use crate::misc::FloatingPoint;

/// Why an update stopped before its iteration cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceReason {
    /// The gradient norm reached the tolerance.
    GradientTolerance,
    /// An iteration left the parameters unchanged.
    Stalled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateStatus {
    Converged(ConvergenceReason),
    /// The iteration cap was hit. The solution holds the last iterate.
    MaxIterationsReached,
}

/// Outcome of a single update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateSolution<T: FloatingPoint, const D: usize> {
    param: SVector<T, D>,
    arrival_time: T,
    arrival_gradient: Option<Vector2<T>>,
    iterations: u64,
    cost_evaluations: u64,
    gradient_evaluations: u64,
    status: UpdateStatus,
}

impl<T: FloatingPoint, const D: usize> UpdateSolution<T, D> {
    pub(crate) fn new(
        param: SVector<T, D>,
        arrival_time: T,
        arrival_gradient: Option<Vector2<T>>,
        iterations: u64,
        cost_evaluations: u64,
        gradient_evaluations: u64,
        status: UpdateStatus,
    ) -> Self {
        Self {
            param,
            arrival_time,
            arrival_gradient,
            iterations,
            cost_evaluations,
            gradient_evaluations,
            status,
        }
    }

    /// Optimal interpolation parameters, inside the parameter box.
    pub fn param(&self) -> &SVector<T, D> {
        &self.param
    }

    /// First interpolation parameter.
    pub fn lambda(&self) -> T {
        self.param[0]
    }

    /// Minimized objective, the arrival time at the target.
    pub fn arrival_time(&self) -> T {
        self.arrival_time
    }

    /// Arrival time gradient at the target, `None` if the final ray segment
    /// has zero length.
    pub fn arrival_gradient(&self) -> Option<&Vector2<T>> {
        self.arrival_gradient.as_ref()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn cost_evaluations(&self) -> u64 {
        self.cost_evaluations
    }

    pub fn gradient_evaluations(&self) -> u64 {
        self.gradient_evaluations
    }

    pub fn status(&self) -> UpdateStatus {
        self.status
    }

    pub fn is_converged(&self) -> bool {
        matches!(self.status, UpdateStatus::Converged(_))
    }
}

impl<T: FloatingPoint> UpdateSolution<T, 2> {
    /// Second interpolation parameter.
    pub fn mu(&self) -> T {
        self.param[1]
    }
}
