//! Request and result types for the verification service

use chrono::{DateTime, Utc};
use ev_shared::validation::{is_six_digit_code, normalize_code, normalize_email};

use crate::errors::VerifyError;

/// A submission that passed shape validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Trimmed, lower-cased email
    pub email: String,
    /// Trimmed 6-digit code
    pub code: String,
}

impl VerificationRequest {
    /// Normalize raw fields. Missing fields count as empty.
    ///
    /// Fails with `InvalidInput` when the email is empty or the code is not
    /// exactly six decimal digits.
    pub fn parse(email: Option<&str>, code: Option<&str>) -> Result<Self, VerifyError> {
        let email = normalize_email(email.unwrap_or_default());
        let code = normalize_code(code.unwrap_or_default());

        if email.is_empty() || !is_six_digit_code(&code) {
            return Err(VerifyError::InvalidInput);
        }

        Ok(Self { email, code })
    }
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Id of the record that was marked verified
    pub record_id: String,
    /// Instant written to `VerifiedOn`
    pub verified_on: DateTime<Utc>,
}
