//! Application layer for the block registration form.
//!
//! This crate owns the single in-progress record (the field store) and the
//! submit flow that validates it, derives the metrics and hands the
//! finished record to whoever consumes it.

pub mod error;
pub mod form_service;
pub mod submit_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use form_service::BlockForm;
pub use submit_service::{BlockSink, FinalizedBlock, SubmitOutcome};
