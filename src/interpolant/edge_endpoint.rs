use nalgebra::{Point2, Vector2};

use crate::error::UpdateError;
use crate::misc::{is_finite_point, is_finite_vector, FloatingPoint};

/// Known data at a mesh node bounding an edge.
///
/// `tangent` is the Hermite "B" vector of the boundary curve through this
/// node and is only present when the edge lies on a curved boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEndpoint<T: FloatingPoint> {
    position: Point2<T>,
    time: T,
    gradient: Vector2<T>,
    tangent: Option<Vector2<T>>,
}

impl<T: FloatingPoint> EdgeEndpoint<T> {
    pub fn new(position: Point2<T>, time: T, gradient: Vector2<T>) -> Self {
        Self {
            position,
            time,
            gradient,
            tangent: None,
        }
    }

    /// Attach the boundary tangent at this node.
    pub fn with_tangent(mut self, tangent: Vector2<T>) -> Self {
        self.tangent = Some(tangent);
        self
    }

    pub fn position(&self) -> &Point2<T> {
        &self.position
    }

    /// Arrival time at the node.
    pub fn time(&self) -> T {
        self.time
    }

    /// Arrival time gradient at the node.
    pub fn gradient(&self) -> &Vector2<T> {
        &self.gradient
    }

    pub fn tangent(&self) -> Option<&Vector2<T>> {
        self.tangent.as_ref()
    }

    /// Boundary tangent, or an error naming `role` when it is missing.
    pub(crate) fn require_tangent(&self, role: &str) -> Result<Vector2<T>, UpdateError> {
        self.tangent.ok_or_else(|| {
            UpdateError::invalid_input(format!("{} endpoint lacks a boundary tangent", role))
        })
    }

    pub(crate) fn validate(&self, role: &str) -> Result<(), UpdateError> {
        let finite = is_finite_point(&self.position)
            && self.time.is_finite()
            && is_finite_vector(&self.gradient)
            && self.tangent.as_ref().map_or(true, is_finite_vector);
        if finite {
            Ok(())
        } else {
            Err(UpdateError::invalid_input(format!(
                "{} endpoint data must be finite",
                role
            )))
        }
    }
}
