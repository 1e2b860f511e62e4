//! Field-level updates written back to a record

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::entities::{format_timestamp, RecordStatus, SUSPICIOUS_NOTE_PREFIX};

/// The subset of record fields a transition writes. Serializes to the store's
/// column names and omits untouched fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordPatch {
    pub status: RecordStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub verified_on: Option<DateTime<Utc>>,
}

impl RecordPatch {
    /// `Status=Verified`, `VerifiedOn=at`
    pub fn verified(at: DateTime<Utc>) -> Self {
        Self {
            status: RecordStatus::Verified,
            notes: None,
            verified_on: Some(at),
        }
    }

    /// `Status=Suspicious`, `Notes="Typed: {email}"`
    pub fn suspicious(typed_email: &str) -> Self {
        Self {
            status: RecordStatus::Suspicious,
            notes: Some(format!("{}{}", SUSPICIOUS_NOTE_PREFIX, typed_email)),
            verified_on: None,
        }
    }
}

fn serialize_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(at) => serializer.serialize_str(&format_timestamp(*at)),
        None => serializer.serialize_none(),
    }
}

/// Optimistic-concurrency guard for a patch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Precondition {
    /// Write unconditionally
    #[default]
    None,
    /// Write only if the item's eTag still equals this value
    IfMatch(String),
}

/// Result of a patch that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// The item changed since it was read
    PreconditionFailed,
}
