//! `RecordStoreTrait` backed by the identity provider and Graph

use async_trait::async_trait;

use ev_core::domain::entities::VerificationRecord;
use ev_core::domain::value_objects::{AccessToken, PatchOutcome, Precondition, RecordFilter, RecordPatch};
use ev_core::errors::StoreError;
use ev_core::services::RecordStoreTrait;

use super::list_client::GraphListClient;
use crate::identity::ClientCredentialProvider;

/// Production record store
pub struct GraphRecordStore {
    identity: ClientCredentialProvider,
    list: GraphListClient,
}

impl GraphRecordStore {
    pub fn new(identity: ClientCredentialProvider, list: GraphListClient) -> Self {
        Self { identity, list }
    }
}

#[async_trait]
impl RecordStoreTrait for GraphRecordStore {
    async fn acquire_token(&self) -> Result<AccessToken, StoreError> {
        self.identity.acquire_token().await
    }

    async fn query_records(
        &self,
        token: &AccessToken,
        filter: &RecordFilter,
    ) -> Result<Vec<VerificationRecord>, StoreError> {
        self.list.query_items(token, filter).await
    }

    async fn patch_record(
        &self,
        token: &AccessToken,
        id: &str,
        patch: &RecordPatch,
        precondition: Precondition,
    ) -> Result<PatchOutcome, StoreError> {
        self.list.patch_fields(token, id, patch, precondition).await
    }
}
