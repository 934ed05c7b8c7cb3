use argmin::core::{ArgminFloat, CostFunction, Gradient};
use nalgebra::{Point2, Vector2};

use crate::{
    curve::{lerp, HermiteCurve},
    error::UpdateError,
    interpolant::{EdgeEndpoint, HermiteTimeInterpolant},
    misc::{distance_rate, unit_direction, FloatingPoint, ParameterBox},
};

use super::{
    finite_cost, finite_gradient, solve_update, validate_chord, validate_index, validate_target,
    SolveSetup, UpdateOptions, UpdateProblem, UpdateSolution,
};

/// Update whose path crosses a curved region boundary.
///
/// The ray leaves the chord `x0 -> x1` at `xλ`, crosses a region with
/// index `n01` to `y(μ)` on the boundary curve `x0 -> x2`, then a region with
/// index `n02` to the target:
/// `f(λ, μ) = T(λ) + n01 ‖xλ - y(μ)‖ + n02 ‖y(μ) - x̂‖`.
#[derive(Clone, Copy, Debug)]
pub struct TwoStepUpdate<T: FloatingPoint> {
    start: Point2<T>,
    end: Point2<T>,
    time: HermiteTimeInterpolant<T>,
    boundary: HermiteCurve<T>,
    target: Point2<T>,
    first_index: T,
    second_index: T,
}

impl<T: FloatingPoint> TwoStepUpdate<T> {
    /// `x0` and `x1` bound the chord with known times. The boundary runs from
    /// `x0` to `x2`, both of which must carry boundary tangents.
    pub fn try_new(
        x0: &EdgeEndpoint<T>,
        x1: &EdgeEndpoint<T>,
        x2: &EdgeEndpoint<T>,
        target: Point2<T>,
        first_index: T,
        second_index: T,
    ) -> Result<Self, UpdateError> {
        x0.validate("first")?;
        x1.validate("second")?;
        x2.validate("boundary")?;
        let start_tangent = x0.require_tangent("first")?;
        let end_tangent = x2.require_tangent("boundary")?;
        validate_index(first_index, "first refractive index")?;
        validate_index(second_index, "second refractive index")?;
        validate_chord(x0.position(), x1.position(), "chord")?;
        validate_chord(x0.position(), x2.position(), "boundary")?;
        validate_target(&target, &[x0.position(), x1.position(), x2.position()])?;

        Ok(Self {
            start: *x0.position(),
            end: *x1.position(),
            time: HermiteTimeInterpolant::new(x0, x1),
            boundary: HermiteCurve::new(
                *x0.position(),
                *x2.position(),
                start_tangent,
                end_tangent,
            ),
            target,
            first_index,
            second_index,
        })
    }

    pub fn boundary(&self) -> &HermiteCurve<T> {
        &self.boundary
    }

    pub fn target(&self) -> &Point2<T> {
        &self.target
    }

    /// Point where the ray leaves the chord.
    pub fn departure_point(&self, lambda: T) -> Point2<T> {
        lerp(lambda, &self.start, &self.end)
    }

    /// Point where the ray crosses the boundary.
    pub fn crossing_point(&self, mu: T) -> Point2<T> {
        self.boundary.point_at(mu)
    }

    /// Minimize over `domain`, starting from its upper corner.
    pub fn solve(
        &self,
        domain: &ParameterBox<T, 2>,
        options: &UpdateOptions<T>,
    ) -> Result<UpdateSolution<T, 2>, UpdateError>
    where
        T: ArgminFloat,
    {
        let setup = SolveSetup {
            domain: *domain,
            start: *domain.upper(),
            default_step: T::constant(0.1),
            monotone: true,
        };
        solve_update(*self, setup, options)
    }
}

impl<T: FloatingPoint> CostFunction for TwoStepUpdate<T> {
    type Param = Vector2<T>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let (lambda, mu) = (param[0], param[1]);
        let x = self.departure_point(lambda);
        let y = self.crossing_point(mu);
        let f = self.time.time_at(lambda)
            + (x - y).norm() * self.first_index
            + (y - self.target).norm() * self.second_index;
        finite_cost(f, param)
    }
}

impl<T: FloatingPoint> Gradient for TwoStepUpdate<T> {
    type Param = Vector2<T>;
    type Gradient = Vector2<T>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let (lambda, mu) = (param[0], param[1]);
        let x = self.departure_point(lambda);
        let y = self.crossing_point(mu);
        let dy = self.boundary.tangent_at(mu);
        let first = x - y;
        let second = y - self.target;

        let d_lambda = self.time.derivative_at(lambda)
            + distance_rate(&first, &(self.end - self.start)) * self.first_index;
        let d_mu = distance_rate(&first, &(-dy)) * self.first_index
            + distance_rate(&second, &dy) * self.second_index;
        finite_gradient(Vector2::new(d_lambda, d_mu), param)
    }
}

impl<T: FloatingPoint> UpdateProblem<T, 2> for TwoStepUpdate<T> {
    fn arrival_gradient(&self, param: &Vector2<T>) -> Option<Vector2<T>> {
        unit_direction(&self.crossing_point(param[1]), &self.target)
            .map(|u| u * self.second_index)
    }
}
