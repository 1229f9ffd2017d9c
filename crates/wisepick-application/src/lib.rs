//! Application layer for WisePick.
//!
//! This crate drives the session state machine against the capability
//! traits: one use case owns the session, issues the three generation calls
//! and the summary capture, and exposes the operations the screens bind to.

pub mod activity_usecase;
pub mod export;

pub use activity_usecase::ActivityUseCase;
pub use export::{Delivery, ExportedSummary, Platform};
