pub mod error;
pub mod exception;
pub mod value;

pub use error::WaypointError;
pub use exception::*;
pub use value::*;
