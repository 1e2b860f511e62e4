//! Client-credential token grant
//!
//! Posts the application's id and secret to the tenant's v2.0 token endpoint
//! and returns the issued bearer token. A token is requested on every call;
//! nothing is cached.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use ev_core::domain::value_objects::AccessToken;
use ev_core::errors::StoreError;
use ev_shared::IdentityConfig;

use crate::{send_error, truncate_body};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token provider for the client-credential grant
pub struct ClientCredentialProvider {
    http: Client,
    config: IdentityConfig,
}

impl ClientCredentialProvider {
    pub fn new(http: Client, config: IdentityConfig) -> Self {
        Self { http, config }
    }

    /// Request a new application token
    pub async fn acquire_token(&self) -> Result<AccessToken, StoreError> {
        let endpoint = self.config.token_endpoint();
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", self.config.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        debug!(tenant_id = %self.config.tenant_id, scope = %self.config.scope, "Requesting application token");

        let response = self
            .http
            .post(&endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Token request could not be sent");
                match send_error("token request", e) {
                    StoreError::Request { message } => StoreError::authentication(message),
                    other => other,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!("HTTP {}: {}", status.as_u16(), truncate_body(&body)),
            };
            error!(status = status.as_u16(), "Identity provider rejected token request");
            return Err(StoreError::authentication(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::decode(format!("token response: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(StoreError::authentication("identity provider returned an empty access token"));
        }

        debug!(
            token_type = token.token_type.as_deref().unwrap_or("Bearer"),
            expires_in = token.expires_in.unwrap_or_default(),
            "Application token issued"
        );

        Ok(AccessToken::new(token.access_token))
    }
}
