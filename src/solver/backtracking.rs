use anyhow::Error;
use argmin::{
    argmin_error,
    core::{ArgminFloat, CostFunction, Problem},
    float,
};
use nalgebra::SVector;

use crate::misc::FloatingPoint;

/// Point accepted by [`BacktrackingLineSearch::search`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSearchStep<F: FloatingPoint, const D: usize> {
    /// Accepted step length
    pub step: F,
    /// `param - step * direction`, not projected
    pub param: SVector<F, D>,
    /// Cost at `param`
    pub cost: F,
}

/// Backtracking step size selection.
///
/// Starting from an initial step, the step is multiplied by `shrink` until the
/// cost strictly improves on the current one or `max_trials` trial points have
/// been evaluated.
#[derive(Clone, Copy, Debug)]
pub struct BacktrackingLineSearch<F> {
    shrink: F,
    max_trials: u64,
}

impl<F: FloatingPoint> Default for BacktrackingLineSearch<F> {
    fn default() -> Self {
        Self {
            shrink: F::constant(0.5),
            max_trials: 10,
        }
    }
}

impl<F> BacktrackingLineSearch<F>
where
    F: FloatingPoint + ArgminFloat,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contraction factor, which must be in `(0, 1)`.
    pub fn with_shrink(mut self, shrink: F) -> Result<Self, Error> {
        if shrink <= float!(0.0) || shrink >= float!(1.0) {
            return Err(argmin_error!(
                InvalidParameter,
                "`BacktrackingLineSearch`: shrink factor must be in (0, 1)."
            ));
        }
        self.shrink = shrink;
        Ok(self)
    }

    /// Set the maximum number of cost evaluations per search.
    pub fn with_max_trials(mut self, max_trials: u64) -> Result<Self, Error> {
        if max_trials == 0 {
            return Err(argmin_error!(
                InvalidParameter,
                "`BacktrackingLineSearch`: at least one trial is required."
            ));
        }
        self.max_trials = max_trials;
        Ok(self)
    }

    pub fn shrink(&self) -> F {
        self.shrink
    }

    pub fn max_trials(&self) -> u64 {
        self.max_trials
    }

    /// Search along `-direction` from `param`, whose cost is `cost`.
    ///
    /// Returns `None` if none of the trial points improves on `cost`.
    pub fn search<O, const D: usize>(
        &self,
        problem: &mut Problem<O>,
        param: &SVector<F, D>,
        direction: &SVector<F, D>,
        cost: F,
        initial_step: F,
    ) -> Result<Option<LineSearchStep<F, D>>, Error>
    where
        O: CostFunction<Param = SVector<F, D>, Output = F>,
    {
        let mut step = initial_step;
        for _ in 0..self.max_trials {
            let trial = param - direction * step;
            let trial_cost = problem.cost(&trial)?;
            if trial_cost < cost {
                return Ok(Some(LineSearchStep {
                    step,
                    param: trial,
                    cost: trial_cost,
                }));
            }
            step *= self.shrink;
        }
        Ok(None)
    }
}
