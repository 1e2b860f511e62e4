use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_api::{config, create_app, AppState};
use ev_core::services::{VerificationService, VerificationServiceConfig};
use ev_infra::create_record_store;
use ev_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing(Environment::from_env());

    info!("Starting email verification API");

    let config = config::load().context("failed to load configuration")?;
    info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        "Configuration loaded"
    );

    let store = Arc::new(
        create_record_store(config.identity.clone(), config.store.clone())
            .context("failed to initialize record store")?,
    );
    let verification_service = Arc::new(VerificationService::new(
        store,
        VerificationServiceConfig::from_store_config(&config.store),
    ));
    let app_state = web::Data::new(AppState::new(verification_service));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let app_config = config.clone();

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    Ok(())
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
