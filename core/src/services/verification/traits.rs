//! Trait for the record store the service depends on

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{AccessToken, PatchOutcome, Precondition, RecordFilter, RecordPatch};
use crate::errors::StoreError;

/// Identity provider plus list store, as seen by the verification service
#[async_trait]
pub trait RecordStoreTrait: Send + Sync {
    /// Obtain a fresh bearer token for the store
    async fn acquire_token(&self) -> Result<AccessToken, StoreError>;

    /// Fetch records matching `filter`, in store order
    async fn query_records(
        &self,
        token: &AccessToken,
        filter: &RecordFilter,
    ) -> Result<Vec<VerificationRecord>, StoreError>;

    /// Write the fields in `patch` to the record with `id`
    async fn patch_record(
        &self,
        token: &AccessToken,
        id: &str,
        patch: &RecordPatch,
        precondition: Precondition,
    ) -> Result<PatchOutcome, StoreError>;
}
