use argmin::core::{ArgminFloat, CostFunction, Gradient};
use nalgebra::{Point2, SVector, Vector2};

use crate::{
    curve::HermiteCurve,
    error::UpdateError,
    interpolant::{EdgeEndpoint, HermiteTimeInterpolant},
    misc::{distance_rate, is_coincident, unit_direction, FloatingPoint, ParameterBox},
};

use super::{
    finite_cost, finite_gradient, solve_update, validate_chord, validate_index, validate_target,
    SolveSetup, UpdateOptions, UpdateProblem, UpdateSolution,
};

/// Update across a fan of `n = D / 2` regions sharing the apex `x0`.
///
/// The fan is bounded by `n + 1` Hermite curves `C_0 .. C_n`, all leaving the
/// apex. `C_0` ends at `x1`, where the arrival time is known along the edge
/// `x0 -> x1`, and `C_n` ends at the target. Region `j` lies between `C_{j-1}`
/// and `C_j` and has index `η_j`; the boundary `C_j` itself is crept along at
/// the cheaper of its two neighbouring indices.
///
/// The ray leaves `C_0` at `μ_0`, crosses region `j` in a straight line from
/// `C_{j-1}(μ_{j-1})` to `C_j(λ_j)` and creeps along `C_j` from `λ_j` to
/// `μ_j` before crossing the next region. On `C_n` it creeps to the target.
/// The parameters are laid out as `[μ_0, λ_1, μ_1, .., λ_{n-1}, μ_{n-1}, λ_n]`:
///
/// `f = T(μ_0) + Σ_j η_j ‖C_j(λ_j) - C_{j-1}(μ_{j-1})‖ + min(η_j, η_{j+1}) L_j(λ_j, μ_j)`
///
/// with `L_j` the Simpson arc length on `C_j`, taken in either order between
/// fan boundaries and from `λ_n` up to `1` on `C_n`.
#[derive(Clone, Debug)]
pub struct TriangleFanUpdate<T: FloatingPoint, const D: usize> {
    time: HermiteTimeInterpolant<T>,
    boundaries: Vec<HermiteCurve<T>>,
    indices: Vec<T>,
}

impl<T: FloatingPoint, const D: usize> TriangleFanUpdate<T, D> {
    /// `x0` is the apex and `x1` the far end of the first boundary. Both carry
    /// known arrival data. `indices[j]` is the index of the region between
    /// `boundaries[j]` and `boundaries[j + 1]`; the last one belongs to the
    /// region past the target's boundary.
    pub fn try_new(
        x0: &EdgeEndpoint<T>,
        x1: &EdgeEndpoint<T>,
        boundaries: Vec<HermiteCurve<T>>,
        indices: Vec<T>,
    ) -> Result<Self, UpdateError> {
        if D == 0 || D % 2 != 0 {
            return Err(UpdateError::invalid_input(format!(
                "a triangle fan needs an even, positive number of parameters, got {}",
                D
            )));
        }
        let regions = D / 2;
        if boundaries.len() != regions + 1 || indices.len() != regions + 1 {
            return Err(UpdateError::invalid_input(format!(
                "a fan of {} regions needs {} boundaries and indices, got {} and {}",
                regions,
                regions + 1,
                boundaries.len(),
                indices.len()
            )));
        }

        x0.validate("apex")?;
        x1.validate("edge")?;
        validate_chord(x0.position(), x1.position(), "chord")?;
        for index in indices.iter() {
            validate_index(*index, "refractive index")?;
        }
        for curve in boundaries.iter() {
            curve.validate()?;
            if !is_coincident(curve.start(), x0.position()) {
                return Err(UpdateError::invalid_input(
                    "every fan boundary must start at the apex",
                ));
            }
            validate_chord(curve.start(), curve.end(), "boundary")?;
        }
        if !is_coincident(boundaries[0].end(), x1.position()) {
            return Err(UpdateError::invalid_input(
                "the first fan boundary must end at the edge node",
            ));
        }
        validate_target(boundaries[regions].end(), &[x0.position(), x1.position()])?;

        Ok(Self {
            time: HermiteTimeInterpolant::new(x0, x1),
            boundaries,
            indices,
        })
    }

    /// Number of regions the ray may cross.
    pub fn regions(&self) -> usize {
        D / 2
    }

    pub fn boundaries(&self) -> &[HermiteCurve<T>] {
        &self.boundaries
    }

    pub fn indices(&self) -> &[T] {
        &self.indices
    }

    pub fn target(&self) -> &Point2<T> {
        self.boundaries[self.regions()].end()
    }

    /// Index used to creep along boundary `j`.
    fn creep_index(&self, j: usize) -> T {
        let (a, b) = (self.indices[j - 1], self.indices[j]);
        if b < a {
            b
        } else {
            a
        }
    }

    /// Cost and gradient in one sweep over the fan.
    fn objective(&self, param: &SVector<T, D>) -> (T, SVector<T, D>) {
        let n = self.regions();
        let mut f = self.time.time_at(param[0]);
        let mut g = SVector::<T, D>::zeros();
        g[0] = self.time.derivative_at(param[0]);

        for j in 1..=n {
            let previous = &self.boundaries[j - 1];
            let current = &self.boundaries[j];
            let shooter = 2 * (j - 1);
            let receiver = 2 * j - 1;
            let mu_prev = param[shooter];
            let lambda = param[receiver];

            let ray = current.point_at(lambda) - previous.point_at(mu_prev);
            let ray_index = self.indices[j - 1];
            f += ray.norm() * ray_index;
            g[receiver] += distance_rate(&ray, &current.tangent_at(lambda)) * ray_index;
            g[shooter] += distance_rate(&ray, &(-previous.tangent_at(mu_prev))) * ray_index;

            let creep_index = self.creep_index(j);
            if j < n {
                let mu = param[2 * j];
                f += current.unsigned_arc_length(lambda, mu) * creep_index;
                let (d_lambda, d_mu) = current.unsigned_arc_length_gradient(lambda, mu);
                g[receiver] += d_lambda * creep_index;
                g[2 * j] += d_mu * creep_index;
            } else {
                // on to the target at t = 1
                f += current.arc_length(lambda, T::one()) * creep_index;
                let (d_lambda, _) = current.arc_length_gradient(lambda, T::one());
                g[receiver] += d_lambda * creep_index;
            }
        }
        (f, g)
    }

    /// Minimize over `domain`, starting from its upper corner.
    pub fn solve(
        &self,
        domain: &ParameterBox<T, D>,
        options: &UpdateOptions<T>,
    ) -> Result<UpdateSolution<T, D>, UpdateError>
    where
        T: ArgminFloat,
    {
        let setup = SolveSetup {
            domain: *domain,
            start: *domain.upper(),
            default_step: T::constant(0.1),
            monotone: true,
        };
        solve_update(self.clone(), setup, options)
    }
}

impl<T: FloatingPoint, const D: usize> CostFunction for TriangleFanUpdate<T, D> {
    type Param = SVector<T, D>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let (f, _) = self.objective(param);
        finite_cost(f, param)
    }
}

impl<T: FloatingPoint, const D: usize> Gradient for TriangleFanUpdate<T, D> {
    type Param = SVector<T, D>;
    type Gradient = SVector<T, D>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let (_, g) = self.objective(param);
        finite_gradient(g, param)
    }
}

impl<T: FloatingPoint, const D: usize> UpdateProblem<T, D> for TriangleFanUpdate<T, D> {
    /// Along the last boundary's end tangent while an arc remains to creep,
    /// along the final straight ray otherwise.
    fn arrival_gradient(&self, param: &SVector<T, D>) -> Option<Vector2<T>> {
        let n = self.regions();
        let last = &self.boundaries[n];
        let lambda = param[D - 1];
        if last.arc_length(lambda, T::one()) > T::default_epsilon() {
            last.end_tangent()
                .try_normalize(T::default_epsilon())
                .map(|u| u * self.creep_index(n))
        } else {
            let from = self.boundaries[n - 1].point_at(param[2 * (n - 1)]);
            unit_direction(&from, self.target()).map(|u| u * self.indices[n - 1])
        }
    }
}
