//! Verification service module for one-time-code email checks
//!
//! This module provides the complete verification workflow:
//! - Input normalization and shape validation
//! - Token acquisition, lookup and status update through `RecordStoreTrait`
//! - An in-memory record store for tests and local runs

mod config;
pub mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::RecordStoreTrait;
pub use types::{VerificationOutcome, VerificationRequest};
