#![allow(clippy::needless_range_loop)]

mod curve;
pub mod error;
mod interpolant;
mod misc;
mod solver;
mod update;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::error::UpdateError;
    pub use crate::interpolant::*;
    pub use crate::misc::*;
    pub use crate::solver::*;
    pub use crate::update::*;
}
