//! CORS middleware configuration for cross-origin requests.
//!
//! The verification endpoint is called from browser forms, so preflight
//! requests must succeed. Development allows any origin; production only
//! the configured allow-list.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ev_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::debug!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(config.max_age)
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!("No ALLOWED_ORIGINS configured; cross-origin requests will be rejected");
    }

    cors
}
