//! # Email Verification Core
//!
//! Domain layer for the one-time-code email check: the verification record,
//! the record store interface, the verification service and its error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
