//! Domain entities representing core business objects.

pub mod verification_record;

// Re-export commonly used types
pub use verification_record::{
    format_timestamp, RecordStatus, VerificationRecord, SUSPICIOUS_NOTE_PREFIX,
};
