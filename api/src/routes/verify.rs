use actix_web::{web, HttpResponse};
use std::sync::Arc;

use ev_core::services::{RecordStoreTrait, VerificationService};

use crate::dto::{OkBody, VerifyRequest};
use crate::handlers::verify_error_response;

/// Application state shared across handlers
pub struct AppState<S: RecordStoreTrait> {
    pub verification_service: Arc<VerificationService<S>>,
}

impl<S: RecordStoreTrait> AppState<S> {
    pub fn new(verification_service: Arc<VerificationService<S>>) -> Self {
        Self { verification_service }
    }
}

/// Handler for POST /api/verify
///
/// Checks a one-time code against the pending verification record for it
/// and marks the record verified, or suspicious when the email differs.
///
/// # Request Body
///
/// ```json
/// { "email": "parent@example.com", "code": "123456" }
/// ```
///
/// # Responses
///
/// - 200 `{"ok":true}`: code valid and email matches
/// - 400 `{"error":"Invalid input"}`: email empty or code not six digits
/// - 400 `{"error":"Invalid or expired code"}`: no pending, unexpired record
/// - 403 `{"error":"Email does not match"}`: record flagged suspicious
/// - 500 `{"error":"Server error"}`: identity provider or store failure
pub async fn verify<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    S: RecordStoreTrait + 'static,
{
    let request = request.into_inner();

    match state
        .verification_service
        .verify(request.email.as_deref(), request.code.as_deref())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(OkBody::ok()),
        Err(error) => verify_error_response(&error),
    }
}
