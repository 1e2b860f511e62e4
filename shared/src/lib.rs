//! Shared utilities and common types for the email verification service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (identity provider, list store, HTTP server)
//! - Response body structures
//! - Utility functions (input normalization, log masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, Environment, IdentityConfig, ServerConfig, StoreConfig,
};
pub use errors::ConfigError;
pub use types::{ErrorBody, HealthResponse, OkBody};
pub use utils::{email, validation};
