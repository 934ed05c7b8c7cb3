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

/// Update of a target lying on a curved boundary which the ray reaches by
/// creeping along that boundary.
///
/// The ray leaves the chord `xA -> xB` at `xλ`, travels straight to `C(μ)` on
/// the boundary `C` (which ends at the target) and follows `C` up to the target:
/// `f(λ, μ) = T(λ) + n ‖C(μ) - xλ‖ + n L(μ, 1)`, with `L` the Simpson arc length.
#[derive(Clone, Copy, Debug)]
pub struct CreepingRayUpdate<T: FloatingPoint> {
    start: Point2<T>,
    end: Point2<T>,
    time: HermiteTimeInterpolant<T>,
    boundary: HermiteCurve<T>,
    index: T,
}

impl<T: FloatingPoint> CreepingRayUpdate<T> {
    /// The target is the end point of `boundary`.
    pub fn try_new(
        from: &EdgeEndpoint<T>,
        to: &EdgeEndpoint<T>,
        boundary: HermiteCurve<T>,
        index: T,
    ) -> Result<Self, UpdateError> {
        from.validate("start")?;
        to.validate("end")?;
        boundary.validate()?;
        validate_index(index, "refractive index")?;
        validate_chord(from.position(), to.position(), "chord")?;
        validate_chord(boundary.start(), boundary.end(), "boundary")?;
        validate_target(boundary.end(), &[from.position(), to.position()])?;

        Ok(Self {
            start: *from.position(),
            end: *to.position(),
            time: HermiteTimeInterpolant::new(from, to),
            boundary,
            index,
        })
    }

    pub fn boundary(&self) -> &HermiteCurve<T> {
        &self.boundary
    }

    pub fn target(&self) -> &Point2<T> {
        self.boundary.end()
    }

    pub fn departure_point(&self, lambda: T) -> Point2<T> {
        lerp(lambda, &self.start, &self.end)
    }

    /// Point where the ray touches the boundary and starts creeping.
    pub fn landing_point(&self, mu: T) -> Point2<T> {
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

impl<T: FloatingPoint> CostFunction for CreepingRayUpdate<T> {
    type Param = Vector2<T>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let (lambda, mu) = (param[0], param[1]);
        let ray = self.landing_point(mu) - self.departure_point(lambda);
        let creep = self.boundary.arc_length(mu, T::one());
        let f = self.time.time_at(lambda) + (ray.norm() + creep) * self.index;
        finite_cost(f, param)
    }
}

impl<T: FloatingPoint> Gradient for CreepingRayUpdate<T> {
    type Param = Vector2<T>;
    type Gradient = Vector2<T>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let (lambda, mu) = (param[0], param[1]);
        let ray = self.landing_point(mu) - self.departure_point(lambda);
        let chord = self.end - self.start;
        let (d_creep, _) = self.boundary.arc_length_gradient(mu, T::one());

        let d_lambda =
            self.time.derivative_at(lambda) + distance_rate(&ray, &(-chord)) * self.index;
        let d_mu =
            (distance_rate(&ray, &self.boundary.tangent_at(mu)) + d_creep) * self.index;
        finite_gradient(Vector2::new(d_lambda, d_mu), param)
    }
}

impl<T: FloatingPoint> UpdateProblem<T, 2> for CreepingRayUpdate<T> {
    /// Along the boundary tangent at the target while an arc remains to creep,
    /// along the straight ray otherwise.
    fn arrival_gradient(&self, param: &Vector2<T>) -> Option<Vector2<T>> {
        let (lambda, mu) = (param[0], param[1]);
        let creep = self.boundary.arc_length(mu, T::one());
        let direction = if creep > T::default_epsilon() {
            self.boundary
                .end_tangent()
                .try_normalize(T::default_epsilon())
        } else {
            unit_direction(&self.departure_point(lambda), self.target())
        };
        direction.map(|u| u * self.index)
    }
}
