//! Application configuration loading
//!
//! Settings are read once at startup: an optional `config.<environment>.toml`
//! file, overridden by process environment variables (after `.env` has been
//! loaded by `main`). Keys are the lower-cased variable names, so
//! `SITE_HOSTNAME` and `site_hostname = "…"` in the file are the same
//! setting.

use config::{Config, File};
use serde::Deserialize;
use thiserror::Error;

use ev_shared::config::{identity, store};
use ev_shared::{AppConfig, CorsConfig, Environment, IdentityConfig, ServerConfig, StoreConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] ev_shared::ConfigError),
}

/// Flat view of every recognized setting
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    environment: Option<String>,

    client_id: Option<String>,
    tenant_id: Option<String>,
    client_secret: Option<String>,
    authority_host: Option<String>,
    graph_scope: Option<String>,

    site_hostname: Option<String>,
    site_path: Option<String>,
    list_id_verif: Option<String>,
    graph_base_url: Option<String>,
    store_request_timeout_secs: Option<u64>,
    store_honor_non_indexed_queries: Option<bool>,
    store_conditional_updates: Option<bool>,

    server_host: Option<String>,
    server_port: Option<u16>,
    functions_customhandler_port: Option<u16>,
    server_workers: Option<usize>,
    max_payload_size: Option<usize>,

    allowed_origins: Option<String>,
    cors_max_age: Option<usize>,
}

/// Load configuration from the optional config file and the environment
pub fn load() -> Result<AppConfig, SettingsError> {
    let environment = Environment::from_env();
    let config = Config::builder()
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(config::Environment::default())
        .build()?;

    from_config(&config, environment)
}

/// Build and validate an `AppConfig` from already-collected sources
pub fn from_config(config: &Config, default_environment: Environment) -> Result<AppConfig, SettingsError> {
    let raw: RawSettings = config.clone().try_deserialize()?;

    let environment = match raw.environment.as_deref() {
        Some(value) => value
            .parse()
            .map_err(|reason: String| ev_shared::ConfigError::invalid("ENVIRONMENT", reason))?,
        None => default_environment,
    };

    let identity = IdentityConfig::new(
        raw.tenant_id.unwrap_or_default(),
        raw.client_id.unwrap_or_default(),
        raw.client_secret.unwrap_or_default(),
    )
    .with_authority_host(
        raw.authority_host
            .unwrap_or_else(|| identity::DEFAULT_AUTHORITY_HOST.to_string()),
    )
    .with_scope(raw.graph_scope.unwrap_or_else(|| identity::DEFAULT_SCOPE.to_string()));

    let mut store = StoreConfig::new(
        raw.site_hostname.unwrap_or_default(),
        raw.site_path.unwrap_or_default(),
        raw.list_id_verif.unwrap_or_default(),
    )
    .with_graph_base_url(
        raw.graph_base_url
            .unwrap_or_else(|| store::DEFAULT_GRAPH_BASE_URL.to_string()),
    )
    .with_honor_non_indexed_queries(raw.store_honor_non_indexed_queries.unwrap_or(false))
    .with_conditional_updates(raw.store_conditional_updates.unwrap_or(false));
    if let Some(timeout) = raw.store_request_timeout_secs {
        store.request_timeout_secs = timeout;
    }

    let defaults = ServerConfig::default();
    let mut server = ServerConfig::new(
        raw.server_host.unwrap_or(defaults.host),
        raw.functions_customhandler_port
            .or(raw.server_port)
            .unwrap_or(defaults.port),
    );
    server.workers = raw.server_workers.unwrap_or(defaults.workers);
    server.max_payload_size = raw.max_payload_size.unwrap_or(defaults.max_payload_size);

    let cors_defaults = CorsConfig::default();
    let cors = CorsConfig::from_origin_list(
        raw.allowed_origins.as_deref().unwrap_or_default(),
        raw.cors_max_age.unwrap_or(cors_defaults.max_age),
    );

    let app_config = AppConfig::new(environment, server, identity, store, cors);
    app_config.validate()?;
    Ok(app_config)
}
