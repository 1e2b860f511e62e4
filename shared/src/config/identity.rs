//! Identity provider configuration for the client-credential grant

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{require, ConfigError};

/// Default authority for token issuance
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Default scope: the list store API's `.default` scope
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Credentials and endpoints used to obtain an application token
#[derive(Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Directory (tenant) id
    pub tenant_id: String,

    /// Application (client) id
    pub client_id: String,

    /// Client secret
    pub client_secret: String,

    /// Authority base URL, without the tenant segment
    #[serde(default = "default_authority_host")]
    pub authority_host: String,

    /// Scope requested for the token
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

impl IdentityConfig {
    /// Create a configuration against the default authority and scope
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authority_host: default_authority_host(),
            scope: default_scope(),
        }
    }

    /// Point the token request at a different authority (sovereign clouds, tests)
    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// `{authority}/{tenant}/oauth2/v2.0/token`
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            self.tenant_id
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("TENANT_ID", &self.tenant_id)?;
        require("CLIENT_ID", &self.client_id)?;
        require("CLIENT_SECRET", &self.client_secret)?;
        if !self.authority_host.starts_with("http://") && !self.authority_host.starts_with("https://") {
            return Err(ConfigError::invalid(
                "AUTHORITY_HOST",
                "must be an absolute http(s) URL",
            ));
        }
        require("GRAPH_SCOPE", &self.scope)
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authority_host", &self.authority_host)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_endpoint() {
        let config = IdentityConfig::new("tenant-1", "client", "secret");
        assert_eq!(
            config.token_endpoint(),
            "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token"
        );

        let config = config.with_authority_host("http://127.0.0.1:9000/");
        assert_eq!(
            config.token_endpoint(),
            "http://127.0.0.1:9000/tenant-1/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = IdentityConfig::new("tenant", "client", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate_requires_credentials() {
        let config = IdentityConfig::new("tenant", "", "secret");
        assert_eq!(config.validate(), Err(ConfigError::missing("CLIENT_ID")));

        let config = IdentityConfig::new("tenant", "client", "secret").with_authority_host("login");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "AUTHORITY_HOST", .. })
        ));
    }
}
