//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use ev_shared::email::mask_email;

use crate::domain::value_objects::{PatchOutcome, Precondition, RecordFilter, RecordPatch};
use crate::errors::{StoreError, VerifyError, VerifyResult};

use super::config::VerificationServiceConfig;
use super::traits::RecordStoreTrait;
use super::types::{VerificationOutcome, VerificationRequest};

/// Verification service: checks an (email, code) submission against the
/// record store and moves the matching record out of `Waiting`.
pub struct VerificationService<S: RecordStoreTrait> {
    /// Identity provider and list store
    store: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: RecordStoreTrait> VerificationService<S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Record store implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self { store, config }
    }

    /// Verify a submission at the current instant
    pub async fn verify(
        &self,
        email: Option<&str>,
        code: Option<&str>,
    ) -> VerifyResult<VerificationOutcome> {
        self.verify_at(email, code, Utc::now()).await
    }

    /// Verify a submission as of `now`
    ///
    /// This method:
    /// 1. Normalizes and validates the input (no store call on failure)
    /// 2. Acquires a fresh bearer token
    /// 3. Looks up `Waiting` records for the code that expire at or after `now`
    /// 4. Marks the first match `Suspicious` if the email differs, otherwise `Verified`
    ///
    /// `now` is used both for the expiry filter and for `VerifiedOn`.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationOutcome)` - The record was marked verified
    /// * `Err(VerifyError)` - Input, business or infrastructure failure
    pub async fn verify_at(
        &self,
        email: Option<&str>,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> VerifyResult<VerificationOutcome> {
        let request = VerificationRequest::parse(email, code).map_err(|e| {
            tracing::debug!(event = "verification_invalid_input", "Rejected malformed verification request");
            e
        })?;

        let token = self
            .store
            .acquire_token()
            .await
            .map_err(|e| Self::infrastructure("acquire_token", e))?;

        let filter = RecordFilter::waiting(&request.code, now);
        let records = self
            .store
            .query_records(&token, &filter)
            .await
            .map_err(|e| Self::infrastructure("query_records", e))?;

        if records.len() > 1 {
            tracing::warn!(
                matches = records.len(),
                event = "verification_multiple_matches",
                "More than one pending record shares this code; using the first"
            );
        }

        let Some(record) = records.into_iter().next() else {
            tracing::info!(
                email = %mask_email(&request.email),
                event = "verification_code_not_found",
                "No pending, unexpired record for submitted code"
            );
            return Err(VerifyError::CodeNotFound);
        };

        let precondition = self.precondition_for(record.etag.as_deref());

        if !record.matches_email(&request.email) {
            let patch = RecordPatch::suspicious(&request.email);
            let outcome = self
                .store
                .patch_record(&token, &record.id, &patch, precondition)
                .await
                .map_err(|e| Self::infrastructure("mark_suspicious", e))?;

            if outcome == PatchOutcome::PreconditionFailed {
                tracing::warn!(
                    record_id = %record.id,
                    event = "verification_record_changed",
                    "Record changed before it could be flagged"
                );
                return Err(VerifyError::CodeNotFound);
            }

            tracing::warn!(
                record_id = %record.id,
                email = %mask_email(&request.email),
                event = "verification_email_mismatch",
                "Submitted email does not match record; marked suspicious"
            );
            return Err(VerifyError::EmailMismatch);
        }

        let patch = RecordPatch::verified(now);
        let outcome = self
            .store
            .patch_record(&token, &record.id, &patch, precondition)
            .await
            .map_err(|e| Self::infrastructure("mark_verified", e))?;

        if outcome == PatchOutcome::PreconditionFailed {
            tracing::warn!(
                record_id = %record.id,
                event = "verification_record_changed",
                "Record changed before it could be verified"
            );
            return Err(VerifyError::CodeNotFound);
        }

        tracing::info!(
            record_id = %record.id,
            email = %mask_email(&request.email),
            event = "verification_succeeded",
            "Verification record marked verified"
        );

        Ok(VerificationOutcome {
            record_id: record.id,
            verified_on: now,
        })
    }

    fn precondition_for(&self, etag: Option<&str>) -> Precondition {
        match (self.config.conditional_updates, etag) {
            (true, Some(etag)) => Precondition::IfMatch(etag.to_string()),
            (true, None) => {
                tracing::debug!("Record has no eTag; falling back to unconditional update");
                Precondition::None
            }
            (false, _) => Precondition::None,
        }
    }

    fn infrastructure(stage: &'static str, error: StoreError) -> VerifyError {
        tracing::error!(
            stage = stage,
            error = %error,
            event = "verification_store_failure",
            "Record store call failed"
        );
        VerifyError::Infrastructure(error)
    }
}
