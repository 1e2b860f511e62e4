//! Configuration for the verification service

use ev_shared::StoreConfig;

/// Configuration for the verification service
#[derive(Debug, Clone, Default)]
pub struct VerificationServiceConfig {
    /// Guard the status update with `If-Match` on the eTag that was read.
    /// When off, a concurrent submission of the same code can overwrite an
    /// update made between the lookup and the write.
    pub conditional_updates: bool,
}

impl VerificationServiceConfig {
    pub fn from_store_config(store: &StoreConfig) -> Self {
        Self {
            conditional_updates: store.conditional_updates,
        }
    }
}
