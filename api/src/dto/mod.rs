//! Request and response payloads

pub mod verify;

pub use ev_shared::{ErrorBody, OkBody};
pub use verify::VerifyRequest;
