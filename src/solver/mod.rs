pub mod backtracking;
pub mod projected_gradient;
pub use backtracking::*;
pub use projected_gradient::*;
