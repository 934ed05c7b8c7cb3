use argmin::core::{ArgminFloat, CostFunction, Gradient};
use nalgebra::{Point2, Vector1, Vector2};

use crate::{
    curve::lerp,
    error::UpdateError,
    interpolant::{EdgeEndpoint, HermiteTimeInterpolant},
    misc::{distance_rate, unit_direction, FloatingPoint, ParameterBox},
};

use super::{
    finite_cost, finite_gradient, solve_update, validate_chord, validate_index, validate_target,
    SolveSetup, UpdateOptions, UpdateProblem, UpdateSolution,
};

/// Update of a target through open space from the straight chord `xA -> xB`:
/// `f(λ) = T(λ) + n ‖x̂ - lerp(λ, xA, xB)‖`.
#[derive(Clone, Copy, Debug)]
pub struct FreeSpaceUpdate<T: FloatingPoint> {
    start: Point2<T>,
    end: Point2<T>,
    time: HermiteTimeInterpolant<T>,
    target: Point2<T>,
    index: T,
}

impl<T: FloatingPoint> FreeSpaceUpdate<T> {
    pub fn try_new(
        from: &EdgeEndpoint<T>,
        to: &EdgeEndpoint<T>,
        target: Point2<T>,
        index: T,
    ) -> Result<Self, UpdateError> {
        from.validate("start")?;
        to.validate("end")?;
        validate_index(index, "refractive index")?;
        validate_chord(from.position(), to.position(), "chord")?;
        validate_target(&target, &[from.position(), to.position()])?;

        Ok(Self {
            start: *from.position(),
            end: *to.position(),
            time: HermiteTimeInterpolant::new(from, to),
            target,
            index,
        })
    }

    pub fn target(&self) -> &Point2<T> {
        &self.target
    }

    pub fn index(&self) -> T {
        self.index
    }

    pub fn departure_point(&self, lambda: T) -> Point2<T> {
        lerp(lambda, &self.start, &self.end)
    }

    /// Minimize over `domain` starting from `lambda0`.
    pub fn solve(
        &self,
        lambda0: T,
        domain: &ParameterBox<T, 1>,
        options: &UpdateOptions<T>,
    ) -> Result<UpdateSolution<T, 1>, UpdateError>
    where
        T: ArgminFloat,
    {
        let setup = SolveSetup {
            domain: *domain,
            start: Vector1::new(lambda0),
            default_step: T::one(),
            monotone: false,
        };
        solve_update(*self, setup, options)
    }
}

impl<T: FloatingPoint> CostFunction for FreeSpaceUpdate<T> {
    type Param = Vector1<T>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let lambda = param[0];
        let x = self.departure_point(lambda);
        let f = self.time.time_at(lambda) + (self.target - x).norm() * self.index;
        finite_cost(f, param)
    }
}

impl<T: FloatingPoint> Gradient for FreeSpaceUpdate<T> {
    type Param = Vector1<T>;
    type Gradient = Vector1<T>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let lambda = param[0];
        let diff = self.departure_point(lambda) - self.target;
        let rate = distance_rate(&diff, &(self.end - self.start));
        let g = self.time.derivative_at(lambda) + rate * self.index;
        finite_gradient(Vector1::new(g), param)
    }
}

impl<T: FloatingPoint> UpdateProblem<T, 1> for FreeSpaceUpdate<T> {
    fn arrival_gradient(&self, param: &Vector1<T>) -> Option<Vector2<T>> {
        unit_direction(&self.departure_point(param[0]), &self.target).map(|u| u * self.index)
    }
}
