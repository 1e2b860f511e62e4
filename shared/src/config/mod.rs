//! Configuration module
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and log filter defaults
//! - `identity` - Client-credential settings for the identity provider
//! - `server` - HTTP server and CORS configuration
//! - `store` - Addressing and behaviour of the remote list store

pub mod environment;
pub mod identity;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

// Re-export commonly used types
pub use environment::Environment;
pub use identity::IdentityConfig;
pub use server::{CorsConfig, ServerConfig};
pub use store::StoreConfig;

/// Complete application configuration combining all sub-configurations
///
/// Built once at startup and handed to the components that need it; nothing
/// downstream reads the process environment directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Identity provider credentials
    pub identity: IdentityConfig,

    /// Remote list store addressing
    pub store: StoreConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Assemble a configuration from its parts
    pub fn new(
        environment: Environment,
        server: ServerConfig,
        identity: IdentityConfig,
        store: StoreConfig,
        cors: CorsConfig,
    ) -> Self {
        Self {
            environment,
            server,
            identity,
            store,
            cors,
        }
    }

    /// Check every section for missing or unusable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.identity.validate()?;
        self.store.validate()?;
        self.server.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
