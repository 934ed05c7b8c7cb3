use std::fmt;

/// Errors that can occur while setting up or solving an update.
///
/// Inside the argmin machinery errors travel as [`anyhow::Error`]; they are
/// turned back into this type at the public API.
#[derive(Debug)]
pub enum UpdateError {
    /// Input rejected before any iteration (bounds, refractive indices,
    /// solver options, missing boundary tangents, ...).
    InvalidInput(String),
    /// Geometry for which the objective or its gradient is not defined,
    /// such as a zero-length chord or a target sitting on a known node.
    DegenerateGeometry(String),
    /// Any other failure reported by the optimization framework.
    Solver(anyhow::Error),
}

impl UpdateError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        UpdateError::InvalidInput(reason.into())
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        UpdateError::DegenerateGeometry(reason.into())
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            UpdateError::DegenerateGeometry(reason) => {
                write!(f, "degenerate geometry: {}", reason)
            }
            UpdateError::Solver(e) => write!(f, "solver failure: {}", e),
        }
    }
}

impl std::error::Error for UpdateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpdateError::Solver(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for UpdateError {
    /// Recover an [`UpdateError`] raised inside a cost or gradient evaluation,
    /// wrapping anything else as [`UpdateError::Solver`].
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<UpdateError>() {
            Ok(err) => err,
            Err(other) => UpdateError::Solver(other),
        }
    }
}

/// Convenience type alias for Results with UpdateError.
pub type Result<T> = std::result::Result<T, UpdateError>;
