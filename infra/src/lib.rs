//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification service
//! depends on:
//! - **Identity**: client-credential token issuance against the Microsoft
//!   identity platform
//! - **Graph**: filtered reads and field patches on the SharePoint list that
//!   holds verification records
//!
//! `GraphRecordStore` combines both behind `ev_core`'s `RecordStoreTrait`.

use std::time::Duration;

use ev_core::errors::StoreError;
use ev_shared::{ConfigError, IdentityConfig, StoreConfig};

/// Identity provider module - client-credential token grant
pub mod identity;

/// Graph module - list store client and record store adapter
pub mod graph;

pub use graph::{GraphListClient, GraphRecordStore};
pub use identity::ClientCredentialProvider;

/// Build the record store used in production from validated configuration
pub fn create_record_store(
    identity: IdentityConfig,
    store: StoreConfig,
) -> Result<GraphRecordStore, InfrastructureError> {
    identity.validate()?;
    store.validate()?;

    let http = build_http_client(Duration::from_secs(store.request_timeout_secs))?;

    tracing::info!(
        site = %store.site_hostname,
        list_id = %store.list_id,
        conditional_updates = store.conditional_updates,
        "Graph record store initialized"
    );

    Ok(GraphRecordStore::new(
        ClientCredentialProvider::new(http.clone(), identity),
        GraphListClient::new(http, store),
    ))
}

/// Shared outbound HTTP client
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, InfrastructureError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("email-verify/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(InfrastructureError::from)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for InfrastructureError {
    fn from(err: ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}

/// Map a failed send. Builder errors (such as an unparseable URL) come from
/// configuration, everything else from the transport.
pub(crate) fn send_error(operation: &str, err: reqwest::Error) -> StoreError {
    if err.is_builder() {
        StoreError::Configuration {
            message: format!("{}: {}", operation, err),
        }
    } else {
        StoreError::request(format!("{} failed: {}", operation, err))
    }
}

/// Cap error bodies before they are logged or wrapped
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 512;
    if body.chars().count() <= MAX_CHARS {
        body.to_string()
    } else {
        let mut truncated: String = body.chars().take(MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    }
}
