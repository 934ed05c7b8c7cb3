pub mod creeping_ray_update;
pub mod edge_update;
pub mod free_space_update;
pub mod triangle_fan_update;
pub mod two_step_update;
pub mod update_options;
pub mod update_problem;
pub mod update_solution;
pub use creeping_ray_update::*;
pub use edge_update::*;
pub use free_space_update::*;
pub use triangle_fan_update::*;
pub use two_step_update::*;
pub use update_options::*;
pub use update_problem::*;
pub use update_solution::*;
