use anyhow::Error;
use argmin::{
    argmin_error, argmin_error_closure,
    core::{
        ArgminFloat, CostFunction, Gradient, IterState, Problem, Solver, State, TerminationReason,
        TerminationStatus, KV,
    },
    float,
};
use nalgebra::SVector;

use crate::misc::{FloatingPoint, ParameterBox};

use super::BacktrackingLineSearch;

/// Message attached to [`TerminationReason::SolverExit`] when the iterate stops moving.
pub const STALLED: &str = "stalled";

type PgdState<F, const D: usize> = IterState<SVector<F, D>, SVector<F, D>, (), (), (), F>;

/// Gradient descent constrained to a [`ParameterBox`].
///
/// Each iteration takes a backtracking step along the negative gradient and
/// clamps the result into the box. With `monotone` enabled, a clamped point
/// whose cost does not strictly improve on the current one is rejected and
/// the solver holds position.
///
/// Terminates when the gradient norm drops to the tolerance
/// ([`TerminationReason::SolverConverged`]) or when an iteration leaves the
/// parameter unchanged ([`TerminationReason::SolverExit`] with [`STALLED`]).
#[derive(Clone, Copy, Debug)]
pub struct ProjectedGradientDescent<F: FloatingPoint, const D: usize> {
    domain: ParameterBox<F, D>,
    line_search: BacktrackingLineSearch<F>,
    initial_step: F,
    tolerance: F,
    monotone: bool,
}

impl<F, const D: usize> ProjectedGradientDescent<F, D>
where
    F: FloatingPoint + ArgminFloat,
{
    pub fn new(domain: ParameterBox<F, D>) -> Self {
        Self {
            domain,
            line_search: BacktrackingLineSearch::default(),
            initial_step: float!(1.0),
            tolerance: F::default_epsilon(),
            monotone: false,
        }
    }

    pub fn with_line_search(mut self, line_search: BacktrackingLineSearch<F>) -> Self {
        self.line_search = line_search;
        self
    }

    /// Step tried first by every line search. Must be positive.
    pub fn with_initial_step(mut self, initial_step: F) -> Result<Self, Error> {
        if initial_step <= float!(0.0) {
            return Err(argmin_error!(
                InvalidParameter,
                "`ProjectedGradientDescent`: initial step must be > 0."
            ));
        }
        self.initial_step = initial_step;
        Ok(self)
    }

    /// Gradient norm at or below which the solver stops. Must be >= 0.
    pub fn with_tolerance(mut self, tolerance: F) -> Result<Self, Error> {
        if tolerance < float!(0.0) {
            return Err(argmin_error!(
                InvalidParameter,
                "`ProjectedGradientDescent`: tolerance must be >= 0."
            ));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn with_monotone(mut self, monotone: bool) -> Self {
        self.monotone = monotone;
        self
    }

    pub fn domain(&self) -> &ParameterBox<F, D> {
        &self.domain
    }
}

impl<O, F, const D: usize> Solver<O, PgdState<F, D>> for ProjectedGradientDescent<F, D>
where
    O: CostFunction<Param = SVector<F, D>, Output = F>
        + Gradient<Param = SVector<F, D>, Gradient = SVector<F, D>>,
    F: FloatingPoint + ArgminFloat,
{
    const NAME: &'static str = "Projected gradient descent";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: PgdState<F, D>,
    ) -> Result<(PgdState<F, D>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`ProjectedGradientDescent` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;

        let param = self.domain.project(&param);
        let cost = problem.cost(&param)?;
        let grad = problem.gradient(&param)?;

        Ok((state.param(param).cost(cost).gradient(grad), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: PgdState<F, D>,
    ) -> Result<(PgdState<F, D>, Option<KV>), Error> {
        let param = state.get_param().cloned().ok_or_else(argmin_error_closure!(
            PotentialBug,
            "`ProjectedGradientDescent`: Parameter vector in state not set."
        ))?;
        let grad = state.get_gradient().cloned().ok_or_else(argmin_error_closure!(
            PotentialBug,
            "`ProjectedGradientDescent`: Gradient in state not set."
        ))?;
        let cost = state.get_cost();

        let step = self
            .line_search
            .search(problem, &param, &grad, cost, self.initial_step)?;
        let Some(step) = step else {
            #[cfg(feature = "log")]
            log::trace!(
                "iter {}: no improving step from {:?}",
                state.get_iter(),
                param.as_slice()
            );
            return Ok((state.param(param), None));
        };

        let candidate = self.domain.project(&step.param);
        let candidate_cost = if candidate == step.param {
            step.cost
        } else {
            problem.cost(&candidate)?
        };

        if self.monotone && candidate_cost >= cost {
            #[cfg(feature = "log")]
            log::trace!(
                "iter {}: rejected projected step to {:?}",
                state.get_iter(),
                candidate.as_slice()
            );
            return Ok((state.param(param), None));
        }

        let next_grad = problem.gradient(&candidate)?;

        #[cfg(feature = "log")]
        log::trace!(
            "iter {}: step {} to {:?}, cost {}",
            state.get_iter(),
            step.step,
            candidate.as_slice(),
            candidate_cost
        );

        Ok((
            state.param(candidate).cost(candidate_cost).gradient(next_grad),
            None,
        ))
    }

    fn terminate(&mut self, state: &PgdState<F, D>) -> TerminationStatus {
        if let Some(grad) = state.get_gradient() {
            if grad.norm() <= self.tolerance {
                return TerminationStatus::Terminated(TerminationReason::SolverConverged);
            }
        }

        if state.get_iter() > 0 {
            if let (Some(current), Some(prev)) = (state.get_param(), state.get_prev_param()) {
                if (current - prev).norm() <= F::default_epsilon() {
                    return TerminationStatus::Terminated(TerminationReason::SolverExit(
                        STALLED.to_string(),
                    ));
                }
            }
        }

        TerminationStatus::NotTerminated
    }
}
