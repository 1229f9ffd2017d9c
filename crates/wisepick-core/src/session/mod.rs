//! Session state machine.

pub mod model;
pub mod phase;

pub use model::Session;
pub use phase::{Phase, TOTAL_STEPS};
