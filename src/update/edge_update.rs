use argmin::core::{ArgminFloat, CostFunction, Gradient};
use nalgebra::{Point2, Vector1, Vector2};

use crate::{
    curve::HermiteCurve,
    error::UpdateError,
    interpolant::{EdgeEndpoint, HermiteTimeInterpolant},
    misc::{distance_rate, unit_direction, FloatingPoint, ParameterBox},
};

use super::{
    finite_cost, finite_gradient, solve_update, validate_chord, validate_index, validate_target,
    SolveSetup, UpdateOptions, UpdateProblem, UpdateSolution,
};

/// Update of a target from a point travelling along a curved boundary edge.
///
/// The wave reaches `P(λ)` on the Hermite edge between the two endpoints and
/// travels straight to the target:
/// `f(λ) = T(λ) + n ‖x̂ - P(λ)‖`, `λ ∈ [0, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct EdgeUpdate<T: FloatingPoint> {
    edge: HermiteCurve<T>,
    time: HermiteTimeInterpolant<T>,
    target: Point2<T>,
    index: T,
}

impl<T: FloatingPoint> EdgeUpdate<T> {
    /// Build the update from both edge endpoints, which must carry boundary tangents.
    ///
    /// # Errors
    /// [`UpdateError::InvalidInput`] for a missing tangent, non-finite data or a
    /// non-positive index; [`UpdateError::DegenerateGeometry`] for a zero-length
    /// edge or a target on one of its endpoints.
    pub fn try_new(
        from: &EdgeEndpoint<T>,
        to: &EdgeEndpoint<T>,
        target: Point2<T>,
        index: T,
    ) -> Result<Self, UpdateError> {
        from.validate("start")?;
        to.validate("end")?;
        let start_tangent = from.require_tangent("start")?;
        let end_tangent = to.require_tangent("end")?;
        validate_index(index, "refractive index")?;
        validate_chord(from.position(), to.position(), "edge")?;
        validate_target(&target, &[from.position(), to.position()])?;

        Ok(Self {
            edge: HermiteCurve::new(*from.position(), *to.position(), start_tangent, end_tangent),
            time: HermiteTimeInterpolant::new(from, to),
            target,
            index,
        })
    }

    pub fn edge(&self) -> &HermiteCurve<T> {
        &self.edge
    }

    pub fn target(&self) -> &Point2<T> {
        &self.target
    }

    pub fn index(&self) -> T {
        self.index
    }

    /// Point on the edge where the ray leaves it.
    pub fn departure_point(&self, lambda: T) -> Point2<T> {
        self.edge.point_at(lambda)
    }

    /// Minimize over `λ ∈ [0, 1]` starting from `lambda0`.
    pub fn solve(
        &self,
        lambda0: T,
        options: &UpdateOptions<T>,
    ) -> Result<UpdateSolution<T, 1>, UpdateError>
    where
        T: ArgminFloat,
    {
        let setup = SolveSetup {
            domain: ParameterBox::unit(),
            start: Vector1::new(lambda0),
            default_step: T::constant(0.25),
            monotone: false,
        };
        solve_update(*self, setup, options)
    }
}

impl<T: FloatingPoint> CostFunction for EdgeUpdate<T> {
    type Param = Vector1<T>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let lambda = param[0];
        let p = self.edge.point_at(lambda);
        let f = self.time.time_at(lambda) + (self.target - p).norm() * self.index;
        finite_cost(f, param)
    }
}

impl<T: FloatingPoint> Gradient for EdgeUpdate<T> {
    type Param = Vector1<T>;
    type Gradient = Vector1<T>;

    /// T'(λ) + n dot(P(λ) - x̂, P'(λ)) / ‖P(λ) - x̂‖
    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let lambda = param[0];
        let diff = self.edge.point_at(lambda) - self.target;
        let rate = distance_rate(&diff, &self.edge.tangent_at(lambda));
        let g = self.time.derivative_at(lambda) + rate * self.index;
        finite_gradient(Vector1::new(g), param)
    }
}

impl<T: FloatingPoint> UpdateProblem<T, 1> for EdgeUpdate<T> {
    fn arrival_gradient(&self, param: &Vector1<T>) -> Option<Vector2<T>> {
        unit_direction(&self.edge.point_at(param[0]), &self.target).map(|u| u * self.index)
    }
}
