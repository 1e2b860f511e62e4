//! Lookup criteria for pending records

use chrono::{DateTime, Utc};

use crate::domain::entities::{RecordStatus, VerificationRecord};

/// Records whose `Token` equals `code`, whose `Status` equals `status` and
/// whose `ExpiresOn` is at or after `expires_not_before`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub code: String,
    pub status: RecordStatus,
    pub expires_not_before: DateTime<Utc>,
}

impl RecordFilter {
    /// Pending, unexpired records for `code` as of `now`
    pub fn waiting(code: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            status: RecordStatus::Waiting,
            expires_not_before: now,
        }
    }

    /// Evaluate the filter locally
    pub fn matches(&self, record: &VerificationRecord) -> bool {
        record.token == self.code
            && record.status == self.status
            && !record.is_expired_at(self.expires_not_before)
    }
}
