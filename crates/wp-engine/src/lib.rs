mod context;
mod guards;
mod jump;
mod point;
mod raise;
mod unwind;

pub use context::{Signal, WaypointContext};
pub use raise::RaiseArg;
