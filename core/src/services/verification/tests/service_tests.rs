//! Unit tests for verification service

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::{RecordStatus, VerificationRecord};
use crate::errors::{ErrorKind, StoreError, VerifyError};
use crate::services::verification::mock::{FailurePoint, InMemoryRecordStore};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

fn request_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
}

fn pending(id: &str, code: &str, email: &str) -> VerificationRecord {
    VerificationRecord::waiting(id, code, email, request_time() + Duration::minutes(10))
}

fn service(store: Arc<InMemoryRecordStore>) -> VerificationService<InMemoryRecordStore> {
    VerificationService::new(store, VerificationServiceConfig::default())
}

fn conditional_service(store: Arc<InMemoryRecordStore>) -> VerificationService<InMemoryRecordStore> {
    VerificationService::new(
        store,
        VerificationServiceConfig {
            conditional_updates: true,
        },
    )
}

#[tokio::test]
async fn test_verify_success_is_case_insensitive() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = service(store.clone());

    let outcome = service
        .verify_at(Some("A@X.com"), Some("123456"), request_time())
        .await
        .unwrap();

    assert_eq!(outcome.record_id, "1");
    assert_eq!(outcome.verified_on, request_time());

    let record = store.get("1").unwrap();
    assert_eq!(record.status, RecordStatus::Verified);
    assert_eq!(record.verified_on, Some(request_time()));
    assert_eq!(record.notes, None);
    assert_eq!(store.token_requests(), 1);
    assert_eq!(store.queries(), 1);
    assert_eq!(store.patches(), 1);
}

#[tokio::test]
async fn test_verify_trims_inputs() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "654321", "a@x.com")]));
    let service = service(store.clone());

    let result = service
        .verify_at(Some("  a@x.com  "), Some(" 654321\t"), request_time())
        .await;

    assert!(result.is_ok());
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Verified);
}

#[tokio::test]
async fn test_invalid_input_makes_no_store_call() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = service(store.clone());

    let cases: [(Option<&str>, Option<&str>); 6] = [
        (Some(""), Some("123456")),
        (Some("   "), Some("123456")),
        (None, Some("123456")),
        (Some("a@x.com"), Some("12345")),
        (Some("a@x.com"), Some("12345a")),
        (Some("a@x.com"), None),
    ];

    for (email, code) in cases {
        let err = service.verify_at(email, code, request_time()).await.unwrap_err();
        assert!(matches!(err, VerifyError::InvalidInput));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    assert_eq!(store.total_calls(), 0);
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Waiting);
}

#[tokio::test]
async fn test_unknown_code() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = service(store.clone());

    let err = service
        .verify_at(Some("a@x.com"), Some("000000"), request_time())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::CodeNotFound));
    assert_eq!(store.patches(), 0);
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Waiting);
}

#[tokio::test]
async fn test_expired_code_is_untouched() {
    let expired = VerificationRecord::waiting("1", "123456", "a@x.com", request_time() - Duration::seconds(1));
    let store = Arc::new(InMemoryRecordStore::with_records(vec![expired]));
    let service = service(store.clone());

    let err = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::CodeNotFound));
    let record = store.get("1").unwrap();
    assert_eq!(record.status, RecordStatus::Waiting);
    assert_eq!(record.verified_on, None);
}

#[tokio::test]
async fn test_code_expiring_at_request_time_is_accepted() {
    let boundary = VerificationRecord::waiting("1", "123456", "a@x.com", request_time());
    let store = Arc::new(InMemoryRecordStore::with_records(vec![boundary]));
    let service = service(store.clone());

    assert!(service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_email_mismatch_marks_suspicious() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = service(store.clone());

    let err = service
        .verify_at(Some("b@x.com"), Some("123456"), request_time())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::EmailMismatch));
    assert_eq!(err.kind(), ErrorKind::Domain);

    let record = store.get("1").unwrap();
    assert_eq!(record.status, RecordStatus::Suspicious);
    assert!(record.notes.unwrap().contains("Typed: b@x.com"));
    assert_eq!(record.verified_on, None);
}

#[tokio::test]
async fn test_padded_target_email_is_a_mismatch() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", " a@x.com ")]));
    let service = service(store.clone());

    let err = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::EmailMismatch));
    let record = store.get("1").unwrap();
    assert_eq!(record.status, RecordStatus::Suspicious);
    assert_eq!(record.notes.as_deref(), Some("Typed: a@x.com"));
}

#[tokio::test]
async fn test_mismatch_note_uses_normalized_email() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = service(store.clone());

    let _ = service
        .verify_at(Some("  Mallory@Evil.COM "), Some("123456"), request_time())
        .await;

    assert_eq!(store.get("1").unwrap().notes.as_deref(), Some("Typed: mallory@evil.com"));
}

#[tokio::test]
async fn test_resubmission_after_transition_is_rejected() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![
        pending("1", "111111", "a@x.com"),
        pending("2", "222222", "a@x.com"),
    ]));
    let service = service(store.clone());

    service
        .verify_at(Some("a@x.com"), Some("111111"), request_time())
        .await
        .unwrap();
    let again = service
        .verify_at(Some("a@x.com"), Some("111111"), request_time())
        .await
        .unwrap_err();
    assert!(matches!(again, VerifyError::CodeNotFound));

    let _ = service
        .verify_at(Some("b@x.com"), Some("222222"), request_time())
        .await;
    let again = service
        .verify_at(Some("a@x.com"), Some("222222"), request_time())
        .await
        .unwrap_err();
    assert!(matches!(again, VerifyError::CodeNotFound));
    assert_eq!(store.get("2").unwrap().status, RecordStatus::Suspicious);
}

#[tokio::test]
async fn test_only_first_match_is_written() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![
        pending("first", "123456", "a@x.com"),
        pending("second", "123456", "a@x.com"),
    ]));
    let service = service(store.clone());

    let outcome = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap();

    assert_eq!(outcome.record_id, "first");
    assert_eq!(store.patches(), 1);
    assert_eq!(store.get("second").unwrap().status, RecordStatus::Waiting);
}

#[tokio::test]
async fn test_token_failure_is_infrastructure() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    store.fail_on(FailurePoint::AcquireToken);
    let service = service(store.clone());

    let err = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::Infrastructure(StoreError::Authentication { .. })));
    assert_eq!(err.public_message(), "Server error");
    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_query_failure_is_infrastructure() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    store.fail_on(FailurePoint::QueryRecords);
    let service = service(store.clone());

    let err = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Infrastructure);
    assert_eq!(store.patches(), 0);
}

#[tokio::test]
async fn test_patch_failure_is_infrastructure_on_both_paths() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![
        pending("1", "111111", "a@x.com"),
        pending("2", "222222", "a@x.com"),
    ]));
    store.fail_on(FailurePoint::PatchRecord);
    let service = service(store.clone());

    let verified = service
        .verify_at(Some("a@x.com"), Some("111111"), request_time())
        .await
        .unwrap_err();
    assert_eq!(verified.kind(), ErrorKind::Infrastructure);

    let mismatch = service
        .verify_at(Some("b@x.com"), Some("222222"), request_time())
        .await
        .unwrap_err();
    assert_eq!(mismatch.kind(), ErrorKind::Infrastructure);

    store.recover(FailurePoint::PatchRecord);
    assert!(service
        .verify_at(Some("a@x.com"), Some("111111"), request_time())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_token_is_fetched_per_invocation() {
    let store = Arc::new(InMemoryRecordStore::new());
    let service = service(store.clone());

    for _ in 0..3 {
        let _ = service.verify_at(Some("a@x.com"), Some("123456"), request_time()).await;
    }

    assert_eq!(store.token_requests(), 3);
}

#[tokio::test]
async fn test_unconditional_update_overwrites_concurrent_write() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    store.simulate_concurrent_writer(true);
    let service = service(store.clone());

    let result = service
        .verify_at(Some("b@x.com"), Some("123456"), request_time())
        .await;

    assert!(matches!(result, Err(VerifyError::EmailMismatch)));
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Suspicious);
}

#[tokio::test]
async fn test_conditional_update_detects_concurrent_write() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    store.simulate_concurrent_writer(true);
    let service = conditional_service(store.clone());

    let result = service
        .verify_at(Some("b@x.com"), Some("123456"), request_time())
        .await;

    assert!(matches!(result, Err(VerifyError::CodeNotFound)));
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Verified);
}

#[tokio::test]
async fn test_conditional_update_applies_when_unchanged() {
    let store = Arc::new(InMemoryRecordStore::with_records(vec![pending("1", "123456", "a@x.com")]));
    let service = conditional_service(store.clone());

    let outcome = service
        .verify_at(Some("a@x.com"), Some("123456"), request_time())
        .await
        .unwrap();

    assert_eq!(outcome.record_id, "1");
    assert_eq!(store.get("1").unwrap().status, RecordStatus::Verified);
}
