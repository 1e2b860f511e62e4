//! Value objects exchanged with the record store.

pub mod access_token;
pub mod record_filter;
pub mod record_patch;

// Re-export commonly used types
pub use access_token::AccessToken;
pub use record_filter::RecordFilter;
pub use record_patch::{PatchOutcome, Precondition, RecordPatch};
