pub mod edge_endpoint;
pub mod hermite_time;
pub use edge_endpoint::*;
pub use hermite_time::*;
