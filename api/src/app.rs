//! Application state and factory
//!
//! This module builds the Actix-web application around an already
//! constructed verification service.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use ev_core::services::RecordStoreTrait;
use ev_shared::{AppConfig, ErrorBody, HealthResponse};

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::{verify, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: RecordStoreTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .content_type_required(false)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Outermost last: request spans wrap CORS handling
        .wrap(create_cors(config.environment, &config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(web::resource("/verify").route(web::post().to(verify::<S>))),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "email-verify-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}
