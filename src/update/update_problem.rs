use anyhow::anyhow;
use argmin::core::{
    ArgminFloat, CostFunction, Executor, Gradient, OptimizationResult, State, TerminationReason,
    TerminationStatus,
};
use nalgebra::{Point2, SVector, Vector2};

use crate::{
    error::UpdateError,
    misc::{is_coincident, is_finite_point, is_finite_vector, FloatingPoint, ParameterBox},
    solver::{BacktrackingLineSearch, ProjectedGradientDescent, STALLED},
};

use super::{ConvergenceReason, UpdateOptions, UpdateSolution, UpdateStatus};

/// Objective of an update over `D` interpolation parameters.
pub trait UpdateProblem<T: FloatingPoint, const D: usize>:
    CostFunction<Param = SVector<T, D>, Output = T>
    + Gradient<Param = SVector<T, D>, Gradient = SVector<T, D>>
{
    /// Arrival time gradient at the target for the path described by `param`.
    fn arrival_gradient(&self, param: &SVector<T, D>) -> Option<Vector2<T>>;
}

/// How a front-end drives the solver.
pub(crate) struct SolveSetup<T: FloatingPoint, const D: usize> {
    pub domain: ParameterBox<T, D>,
    pub start: SVector<T, D>,
    pub default_step: T,
    pub monotone: bool,
}

/// Minimize `problem` by projected gradient descent inside `setup.domain`.
pub(crate) fn solve_update<T, P, const D: usize>(
    problem: P,
    setup: SolveSetup<T, D>,
    options: &UpdateOptions<T>,
) -> Result<UpdateSolution<T, D>, UpdateError>
where
    T: FloatingPoint + ArgminFloat,
    P: UpdateProblem<T, D>,
{
    options.validate()?;
    if !is_finite_vector(&setup.start) {
        return Err(UpdateError::invalid_input(
            "starting parameter must be finite",
        ));
    }
    // curves and interpolants are only defined on [0, 1]
    if !setup.domain.is_within(&ParameterBox::unit()) {
        return Err(UpdateError::invalid_input(
            "parameter box must lie within [0, 1] on every axis",
        ));
    }

    let line_search =
        BacktrackingLineSearch::new().with_max_trials(options.max_line_search_trials)?;
    let solver = ProjectedGradientDescent::new(setup.domain)
        .with_line_search(line_search)
        .with_initial_step(options.initial_step.unwrap_or(setup.default_step))?
        .with_tolerance(options.tolerance)?
        .with_monotone(setup.monotone);

    // init evaluates the first gradient, each iteration one more
    let max_iters = options.max_iters.saturating_sub(1);
    let OptimizationResult {
        mut problem, state, ..
    } = Executor::new(problem, solver)
        .configure(|state| state.param(setup.start).max_iters(max_iters))
        .run()?;

    let param = state
        .get_param()
        .cloned()
        .ok_or_else(|| UpdateError::Solver(anyhow!("solver returned no parameter")))?;

    let status = match state.get_termination_status() {
        TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
            UpdateStatus::Converged(ConvergenceReason::GradientTolerance)
        }
        TerminationStatus::Terminated(TerminationReason::SolverExit(msg)) if msg == STALLED => {
            UpdateStatus::Converged(ConvergenceReason::Stalled)
        }
        TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
            UpdateStatus::MaxIterationsReached
        }
        other => {
            return Err(UpdateError::Solver(anyhow!(
                "unexpected termination: {:?}",
                other
            )))
        }
    };

    // a capped run reports the best iterate, not the last
    let (param, arrival_time) = match (status, state.get_best_param()) {
        (UpdateStatus::MaxIterationsReached, Some(best)) => (*best, state.get_best_cost()),
        _ => (param, state.get_cost()),
    };

    let count = |key: &str| problem.counts.get(key).copied().unwrap_or(0);
    let cost_evaluations = count("cost_count");
    let gradient_evaluations = count("gradient_count");
    let arrival_gradient = problem
        .take_problem()
        .and_then(|p| p.arrival_gradient(&param));

    #[cfg(feature = "log")]
    log::debug!(
        "update finished after {} iterations ({:?}) at {:?}",
        state.get_iter(),
        status,
        param.as_slice()
    );

    Ok(UpdateSolution::new(
        param,
        arrival_time,
        arrival_gradient,
        state.get_iter(),
        cost_evaluations,
        gradient_evaluations,
        status,
    ))
}

/// Reject a refractive index that is not a finite positive number.
pub(crate) fn validate_index<T: FloatingPoint>(index: T, name: &str) -> Result<(), UpdateError> {
    if index.is_finite() && index > T::zero() {
        Ok(())
    } else {
        Err(UpdateError::invalid_input(format!(
            "{} must be finite and positive, got {}",
            name,
            index.as_f64()
        )))
    }
}

/// Reject a non-finite target, or one sitting on a known node.
pub(crate) fn validate_target<T: FloatingPoint>(
    target: &Point2<T>,
    nodes: &[&Point2<T>],
) -> Result<(), UpdateError> {
    if !is_finite_point(target) {
        return Err(UpdateError::invalid_input("target must be finite"));
    }
    if nodes.iter().any(|node| is_coincident(target, node)) {
        return Err(UpdateError::degenerate(
            "target coincides with a known node",
        ));
    }
    Ok(())
}

/// Reject a segment whose end points coincide.
pub(crate) fn validate_chord<T: FloatingPoint>(
    a: &Point2<T>,
    b: &Point2<T>,
    name: &str,
) -> Result<(), UpdateError> {
    if is_coincident(a, b) {
        Err(UpdateError::degenerate(format!("zero-length {}", name)))
    } else {
        Ok(())
    }
}

/// Pass a cost through, or report it as degenerate if it is not finite.
pub(crate) fn finite_cost<T: FloatingPoint, const D: usize>(
    cost: T,
    param: &SVector<T, D>,
) -> Result<T, anyhow::Error> {
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(UpdateError::degenerate(format!(
            "non-finite cost at {:?}",
            param.iter().map(|v| v.as_f64()).collect::<Vec<_>>()
        ))
        .into())
    }
}

/// Pass a gradient through, or report it as degenerate if it is not finite.
pub(crate) fn finite_gradient<T: FloatingPoint, const D: usize>(
    gradient: SVector<T, D>,
    param: &SVector<T, D>,
) -> Result<SVector<T, D>, anyhow::Error> {
    if is_finite_vector(&gradient) {
        Ok(gradient)
    } else {
        Err(UpdateError::degenerate(format!(
            "non-finite gradient at {:?}",
            param.iter().map(|v| v.as_f64()).collect::<Vec<_>>()
        ))
        .into())
    }
}
