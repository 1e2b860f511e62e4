//! Verification record entity, as held in the remote list store.
//!
//! Records are created upstream in the `Waiting` state when a code is
//! issued. This service only ever moves a record out of `Waiting`, to either
//! `Verified` or `Suspicious`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Prefix written to `Notes` when the submitted email does not match
pub const SUSPICIOUS_NOTE_PREFIX: &str = "Typed: ";

/// Lifecycle status of a verification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Code issued, awaiting confirmation
    Waiting,
    /// Code confirmed by the addressee
    Verified,
    /// Code submitted together with a different email
    Suspicious,
    /// Any status this service does not act on
    #[serde(other)]
    Other,
}

impl RecordStatus {
    /// Value as stored in the `Status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Waiting => "Waiting",
            RecordStatus::Verified => "Verified",
            RecordStatus::Suspicious => "Suspicious",
            RecordStatus::Other => "Other",
        }
    }

    /// Verified and Suspicious are final as far as this service is concerned
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Verified | RecordStatus::Suspicious)
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issued one-time code and its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Store-assigned item id
    pub id: String,

    /// Item eTag at the time it was read, if the store reported one
    pub etag: Option<String>,

    /// The 6-digit one-time code
    pub token: String,

    /// Email address the code was issued to
    pub target_email: String,

    /// Current status
    pub status: RecordStatus,

    /// Instant after which the code can no longer be redeemed
    pub expires_on: Option<DateTime<Utc>>,

    /// Free-text annotation
    pub notes: Option<String>,

    /// Set when the code is successfully verified
    pub verified_on: Option<DateTime<Utc>>,
}

impl VerificationRecord {
    /// Create a pending record, as the upstream issuer would
    pub fn waiting(
        id: impl Into<String>,
        token: impl Into<String>,
        target_email: impl Into<String>,
        expires_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            etag: None,
            token: token.into(),
            target_email: target_email.into(),
            status: RecordStatus::Waiting,
            expires_on: Some(expires_on),
            notes: None,
            verified_on: None,
        }
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Redeemable while `now <= ExpiresOn`. A record without an expiry never is.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_on {
            Some(expires_on) => now > expires_on,
            None => true,
        }
    }

    /// Case-insensitive comparison against the target email. The stored
    /// value is not trimmed; `submitted` is expected to be normalized.
    pub fn matches_email(&self, submitted: &str) -> bool {
        self.target_email.to_lowercase() == submitted
    }
}

/// Render a timestamp the way the store expects it: RFC 3339, UTC,
/// millisecond precision, `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
