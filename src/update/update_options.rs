use crate::{error::UpdateError, misc::FloatingPoint};

/// Stopping criteria and step control shared by every update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateOptions<T: FloatingPoint> {
    /// Gradient norm at or below which the update is considered converged.
    pub tolerance: T,
    /// Maximum number of gradient evaluations.
    pub max_iters: u64,
    /// First step tried by the line search.
    /// `None` uses the default of the update type.
    pub initial_step: Option<T>,
    /// Maximum number of cost evaluations per line search.
    pub max_line_search_trials: u64,
}

impl<T: FloatingPoint> Default for UpdateOptions<T> {
    fn default() -> Self {
        Self {
            tolerance: T::constant(1e-8),
            max_iters: 50,
            initial_step: None,
            max_line_search_trials: 10,
        }
    }
}

impl<T: FloatingPoint> UpdateOptions<T> {
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_initial_step(mut self, initial_step: T) -> Self {
        self.initial_step = Some(initial_step);
        self
    }

    pub fn with_max_line_search_trials(mut self, max_line_search_trials: u64) -> Self {
        self.max_line_search_trials = max_line_search_trials;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UpdateError> {
        if !self.tolerance.is_finite() || self.tolerance < T::zero() {
            return Err(UpdateError::invalid_input(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance.as_f64()
            )));
        }
        if self.max_iters == 0 {
            return Err(UpdateError::invalid_input(
                "iteration cap must be at least 1",
            ));
        }
        if self.max_line_search_trials == 0 {
            return Err(UpdateError::invalid_input(
                "line search needs at least one trial",
            ));
        }
        if let Some(step) = self.initial_step {
            if !step.is_finite() || step <= T::zero() {
                return Err(UpdateError::invalid_input(format!(
                    "initial step must be finite and positive, got {}",
                    step.as_f64()
                )));
            }
        }
        Ok(())
    }
}
