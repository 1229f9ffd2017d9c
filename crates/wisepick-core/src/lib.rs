//! Domain layer for the WisePick rational-choice shopping activity.
//!
//! This crate owns the session state machine and the consistency rules
//! around budgets, criteria selection and the decision grid. External
//! collaborators (the generation service and the summary capture utility)
//! are abstracted behind the capability traits in [`advisor`].

pub mod advisor;
pub mod alternative;
pub mod budget;
pub mod criterion;
pub mod error;
pub mod rating;
pub mod session;

// Re-export common error type
pub use error::{Result, WisepickError};
