//! Remote list store configuration

use serde::{Deserialize, Serialize};

use crate::errors::{require, ConfigError};

/// Default list store API base
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Addressing for the verification list plus outbound request behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Site hostname, e.g. `contoso.sharepoint.com`
    pub site_hostname: String,

    /// Server-relative site path, e.g. `/sites/Management`
    pub site_path: String,

    /// Identifier of the verification list
    pub list_id: String,

    /// API base URL
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Send `Prefer: HonorNonIndexedQueriesWarningMayFailRandomly` with queries
    #[serde(default)]
    pub honor_non_indexed_queries: bool,

    /// Guard patches with `If-Match` on the eTag that was read
    #[serde(default)]
    pub conditional_updates: bool,
}

fn default_graph_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    pub fn new(
        site_hostname: impl Into<String>,
        site_path: impl Into<String>,
        list_id: impl Into<String>,
    ) -> Self {
        Self {
            site_hostname: site_hostname.into(),
            site_path: site_path.into(),
            list_id: list_id.into(),
            graph_base_url: default_graph_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            honor_non_indexed_queries: false,
            conditional_updates: false,
        }
    }

    pub fn with_graph_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.graph_base_url = base_url.into();
        self
    }

    pub fn with_conditional_updates(mut self, enabled: bool) -> Self {
        self.conditional_updates = enabled;
        self
    }

    pub fn with_honor_non_indexed_queries(mut self, enabled: bool) -> Self {
        self.honor_non_indexed_queries = enabled;
        self
    }

    /// Site path under a managed path, `/sites/<name>` or `/teams/<name>`.
    ///
    /// Accepts `/sites/Name`, `sites/Name`, `/teams/Name`, `/Name` or `Name`;
    /// anything not already under `sites/` or `teams/` goes under `/sites`.
    pub fn normalized_site_path(&self) -> String {
        let trimmed = self.site_path.trim().trim_matches('/');
        if trimmed.starts_with("sites/") || trimmed.starts_with("teams/") {
            format!("/{}", trimmed)
        } else {
            format!("/sites/{}", trimmed)
        }
    }

    /// `{base}/sites/{host}:{path}:/lists/{list}/items`
    pub fn items_url(&self) -> String {
        format!(
            "{}/sites/{}:{}:/lists/{}/items",
            self.graph_base_url.trim_end_matches('/'),
            self.site_hostname,
            self.normalized_site_path(),
            self.list_id
        )
    }

    /// `{items_url}/{id}/fields`
    pub fn item_fields_url(&self, item_id: &str) -> String {
        format!("{}/{}/fields", self.items_url(), item_id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("SITE_HOSTNAME", &self.site_hostname)?;
        require("SITE_PATH", &self.site_path)?;
        require("LIST_ID_VERIF", &self.list_id)?;
        if self.site_hostname.contains('/') {
            return Err(ConfigError::invalid(
                "SITE_HOSTNAME",
                "expected a bare hostname without scheme or path",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "STORE_REQUEST_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
