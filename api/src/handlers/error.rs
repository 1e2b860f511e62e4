//! Mapping of verification errors to HTTP responses
//!
//! This is the only place status codes are chosen. Infrastructure failures
//! are logged by the service with their failing stage and collapse to a bare
//! 500 here.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};

use ev_core::errors::VerifyError;

use crate::dto::ErrorBody;

/// Convert a failed verification into its response
pub fn verify_error_response(error: &VerifyError) -> HttpResponse {
    let body = ErrorBody::new(error.public_message());

    match error {
        VerifyError::InvalidInput | VerifyError::CodeNotFound => HttpResponse::BadRequest().json(body),
        VerifyError::EmailMismatch => HttpResponse::Forbidden().json(body),
        VerifyError::Infrastructure(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Unparseable bodies are reported the same way as empty fields
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected unparseable verification body");
    let response = HttpResponse::BadRequest().json(ErrorBody::new(VerifyError::InvalidInput.public_message()));
    InternalError::from_response(err, response).into()
}
