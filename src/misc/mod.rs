pub mod floating_point;
pub mod parameter_box;
pub mod vector;

pub use floating_point::*;
pub use parameter_box::*;
pub use vector::*;

#[cfg(test)]
mod tests;
