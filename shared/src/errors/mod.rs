//! Shared error types

use std::fmt;

/// Error raised while assembling or validating configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was absent or blank
    Missing { key: &'static str },
    /// A setting was present but could not be used
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn missing(key: &'static str) -> Self {
        ConfigError::Missing { key }
    }

    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { key } => write!(f, "Missing required setting: {}", key),
            ConfigError::Invalid { key, reason } => {
                write!(f, "Invalid setting {}: {}", key, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Ensure a required string setting is present and not blank
pub fn require(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::missing(key))
    } else {
        Ok(())
    }
}
