//! Chunked write-back with per-item failure isolation.

mod mocks;

use chrono::NaiveDate;
use contact_verifier::persistence::BatchWriter;
use contact_verifier::repositories::ContactRepository;
use contact_verifier::{Contact, Metrics, RateLimiter, VerificationResult, VerificationStatus};
use mocks::MockContactRepository;
use std::sync::Arc;

fn results(count: usize) -> Vec<VerificationResult> {
    (1..=count)
        .map(|i| {
            let contact = Contact::new(format!("003{:03}", i), format!("Person {}", i));
            VerificationResult::for_contact(&contact, VerificationStatus::Confirmed, "ok".into())
        })
        .collect()
}

fn writer(repo: &MockContactRepository, limiter: Arc<RateLimiter>, batch_size: usize) -> BatchWriter {
    BatchWriter::new(
        Arc::new(repo.clone()) as Arc<dyn ContactRepository>,
        limiter,
        batch_size,
        Metrics::new(),
    )
}

#[tokio::test]
async fn test_one_throttle_per_chunk_and_isolated_failures() {
    let repo = MockContactRepository::new();
    repo.fail_writes_for("003002");
    repo.fail_writes_for("003024");
    let limiter = Arc::new(RateLimiter::from_millis(0));

    let outcome = writer(&repo, limiter.clone(), 10)
        .persist(&results(25), false)
        .await;

    // ceil(25 / 10) chunks
    assert_eq!(limiter.call_count(), 3);
    assert_eq!(repo.get_call_count("write_verification"), 25);
    assert_eq!(outcome.success_count, 23);
    assert_eq!(outcome.error_count, 2);
    assert_eq!(
        outcome.errors,
        vec![
            "Person 2: API error (status 500): write rejected for 003002".to_string(),
            "Person 24: API error (status 500): write rejected for 003024".to_string(),
        ]
    );

    let mut written: Vec<String> = repo.written().into_iter().map(|u| u.contact_id).collect();
    written.sort();
    assert_eq!(written.len(), 23);
    assert!(!written.contains(&"003002".to_string()));
    assert!(!written.contains(&"003024".to_string()));
}

#[tokio::test]
async fn test_dry_run_reports_full_success_without_writes() {
    let repo = MockContactRepository::new();
    repo.fail_writes_for("003001");
    let limiter = Arc::new(RateLimiter::from_millis(0));

    let outcome = writer(&repo, limiter.clone(), 10)
        .persist(&results(7), true)
        .await;

    assert_eq!(outcome.success_count, 7);
    assert_eq!(outcome.error_count, 0);
    assert!(outcome.errors.is_empty());
    assert_eq!(repo.get_call_count("write_verification"), 0);
    assert_eq!(limiter.call_count(), 0);
}

#[tokio::test]
async fn test_written_fields_follow_result() {
    let repo = MockContactRepository::new();
    let contact = Contact::new("003XYZ", "Jane Doe").with_company("Acme");
    let mut confirmed =
        VerificationResult::for_contact(&contact, VerificationStatus::Confirmed, "seen".into());
    confirmed.source_url = Some("https://www.linkedin.com/in/janedoe".to_string());
    let failed = VerificationResult::failed(&Contact::new("003ERR", "John Roe"), &"timeout");

    let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    writer(&repo, Arc::new(RateLimiter::from_millis(0)), 5)
        .persist_on(&[confirmed, failed], false, day)
        .await;

    let mut written = repo.written();
    written.sort_by(|a, b| a.contact_id.cmp(&b.contact_id));
    assert_eq!(written.len(), 2);

    let fields = written[0].to_crm_fields();
    assert_eq!(written[0].contact_id, "003ERR");
    assert_eq!(fields["Verification_Status__c"], "Unknown");
    assert_eq!(fields["Verification_Notes__c"], "Verification failed: timeout");
    assert_eq!(fields["Last_Verified__c"], "2026-10-16");

    let fields = written[1].to_crm_fields();
    assert_eq!(fields["Verification_Status__c"], "Confirmed");
    assert_eq!(
        fields["Verification_Source__c"],
        "https://www.linkedin.com/in/janedoe"
    );
}

#[tokio::test]
async fn test_chunks_are_spaced_by_limiter() {
    let repo = MockContactRepository::new();
    let limiter = Arc::new(RateLimiter::from_millis(60));

    let start = std::time::Instant::now();
    writer(&repo, limiter.clone(), 2).persist(&results(5), false).await;

    assert_eq!(limiter.call_count(), 3);
    assert!(start.elapsed() >= std::time::Duration::from_millis(120));
}
