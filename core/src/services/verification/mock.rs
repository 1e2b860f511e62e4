//! In-memory record store for tests and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{RecordStatus, VerificationRecord};
use crate::domain::value_objects::{AccessToken, PatchOutcome, Precondition, RecordFilter, RecordPatch};
use crate::errors::StoreError;

use super::traits::RecordStoreTrait;

/// Store capability that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    AcquireToken,
    QueryRecords,
    PatchRecord,
}

/// Thread-safe fake of the identity provider and list store.
///
/// Records are kept in insertion order, which is the order queries return
/// them in. Every applied patch assigns a new eTag.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<VerificationRecord>>,
    fail_token: AtomicBool,
    fail_query: AtomicBool,
    fail_patch: AtomicBool,
    concurrent_writer: AtomicBool,
    token_requests: AtomicUsize,
    queries: AtomicUsize,
    patches: AtomicUsize,
    etag_counter: AtomicU64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`; each gets an eTag if it has none
    pub fn with_records(records: Vec<VerificationRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, mut record: VerificationRecord) {
        if record.etag.is_none() {
            record.etag = Some(self.next_etag());
        }
        self.lock().push(record);
    }

    pub fn get(&self, id: &str) -> Option<VerificationRecord> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    /// Make a capability fail with a store error
    pub fn fail_on(&self, point: FailurePoint) {
        self.flag(point).store(true, Ordering::SeqCst);
    }

    pub fn recover(&self, point: FailurePoint) {
        self.flag(point).store(false, Ordering::SeqCst);
    }

    /// Simulate another request verifying every matched record between this
    /// request's lookup and its update
    pub fn simulate_concurrent_writer(&self, enabled: bool) {
        self.concurrent_writer.store(enabled, Ordering::SeqCst);
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn patches(&self) -> usize {
        self.patches.load(Ordering::SeqCst)
    }

    /// Total collaborator calls of any kind
    pub fn total_calls(&self) -> usize {
        self.token_requests() + self.queries() + self.patches()
    }

    fn flag(&self, point: FailurePoint) -> &AtomicBool {
        match point {
            FailurePoint::AcquireToken => &self.fail_token,
            FailurePoint::QueryRecords => &self.fail_query,
            FailurePoint::PatchRecord => &self.fail_patch,
        }
    }

    fn next_etag(&self) -> String {
        let n = self.etag_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("\"mem-{},{}\"", n, n)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<VerificationRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStoreTrait for InMemoryRecordStore {
    async fn acquire_token(&self) -> Result<AccessToken, StoreError> {
        let n = self.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_token.load(Ordering::SeqCst) {
            return Err(StoreError::authentication("invalid_client"));
        }
        Ok(AccessToken::new(format!("mem-token-{}", n)))
    }

    async fn query_records(
        &self,
        _token: &AccessToken,
        filter: &RecordFilter,
    ) -> Result<Vec<VerificationRecord>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(StoreError::unexpected_status(503, "service unavailable"));
        }

        let matched: Vec<VerificationRecord> =
            self.lock().iter().filter(|r| filter.matches(r)).cloned().collect();

        if self.concurrent_writer.load(Ordering::SeqCst) {
            let mut records = self.lock();
            for record in records.iter_mut().filter(|r| filter.matches(r)) {
                record.status = RecordStatus::Verified;
                record.verified_on = Some(filter.expires_not_before);
                record.etag = Some(self.next_etag());
            }
        }

        Ok(matched)
    }

    async fn patch_record(
        &self,
        _token: &AccessToken,
        id: &str,
        patch: &RecordPatch,
        precondition: Precondition,
    ) -> Result<PatchOutcome, StoreError> {
        self.patches.fetch_add(1, Ordering::SeqCst);
        if self.fail_patch.load(Ordering::SeqCst) {
            return Err(StoreError::request("connection reset by peer"));
        }

        let new_etag = self.next_etag();
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::unexpected_status(404, format!("item {} not found", id)))?;

        if let Precondition::IfMatch(expected) = &precondition {
            if record.etag.as_deref() != Some(expected.as_str()) {
                return Ok(PatchOutcome::PreconditionFailed);
            }
        }

        record.status = patch.status;
        if let Some(notes) = &patch.notes {
            record.notes = Some(notes.clone());
        }
        if let Some(verified_on) = patch.verified_on {
            record.verified_on = Some(verified_on);
        }
        record.etag = Some(new_etag);

        Ok(PatchOutcome::Applied)
    }
}
