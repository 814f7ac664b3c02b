//! Data-quality assessment through the verifier interface.

mod mocks;

use chrono::{TimeZone, Utc};
use contact_verifier::quality::{DataQualityAssessor, MailDomainChecker};
use contact_verifier::report::VerificationMode;
use contact_verifier::services::{ContactVerifier, QualityVerifier};
use contact_verifier::{Contact, VerificationStatus};
use mocks::MockMailDomainChecker;
use std::sync::Arc;

fn assessor(checker: &MockMailDomainChecker) -> DataQualityAssessor {
    DataQualityAssessor::new(
        true,
        Some(Arc::new(checker.clone()) as Arc<dyn MailDomainChecker>),
    )
}

#[tokio::test]
async fn test_missing_company_title_and_dead_domain() {
    let checker = MockMailDomainChecker::with_valid(&["acme.com"]);
    let contact = Contact::new("003A", "Jane Doe")
        .with_email("jane@no-such-domain.invalid")
        .with_last_modified("2026-09-01T00:00:00Z");

    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let result = assessor(&checker).assess_as_of(&contact, now).await;

    assert_eq!(
        result.issues,
        vec![
            "Missing company".to_string(),
            "Missing job title".to_string(),
            "Invalid email domain (no mail servers)".to_string(),
        ]
    );
    assert_eq!(result.recommendations.len(), 3);
    let confidence = result.confidence.unwrap();
    assert!(confidence <= 0.3 + 1e-9);
    assert!((confidence - 0.3).abs() < 1e-9);
    assert_eq!(result.status, VerificationStatus::Outdated);
    assert_eq!(
        result.notes,
        "Data quality: POOR. \
         Issues: Missing company; Missing job title; Invalid email domain (no mail servers). \
         Recommendations: Add the contact's current company; Add the contact's current job title; \
         Confirm the contact's current email address. \
         Confidence: 30%"
    );
    assert_eq!(checker.lookups(), vec!["no-such-domain.invalid".to_string()]);
}

#[tokio::test]
async fn test_valid_domain_passes() {
    let checker = MockMailDomainChecker::with_valid(&["acme.com"]);
    let contact = Contact::new("003A", "Jane Doe")
        .with_company("Acme")
        .with_title("CFO")
        .with_email("Jane@ACME.com");

    let result = assessor(&checker).assess(&contact).await;

    assert_eq!(result.status, VerificationStatus::Confirmed);
    assert!(result.issues.is_empty());
    assert_eq!(checker.lookups(), vec!["acme.com".to_string()]);
}

#[tokio::test]
async fn test_email_checks_skipped_when_disabled() {
    let checker = MockMailDomainChecker::with_valid(&[]);
    let assessor = DataQualityAssessor::new(
        false,
        Some(Arc::new(checker.clone()) as Arc<dyn MailDomainChecker>),
    );
    let contact = Contact::new("003A", "Jane Doe")
        .with_company("Acme")
        .with_title("CFO")
        .with_email("jane@nowhere.invalid");

    let result = assessor.assess(&contact).await;

    assert_eq!(result.status, VerificationStatus::Confirmed);
    assert!(checker.lookups().is_empty());
}

#[tokio::test]
async fn test_quality_verifier_carries_confidence() {
    let verifier = QualityVerifier::new(DataQualityAssessor::new(false, None));
    let contact = Contact::new("003B", "John Roe").with_company("Globex");

    let result = verifier.verify(&contact).await.unwrap();

    assert_eq!(verifier.mode(), VerificationMode::DataQuality);
    assert_eq!(verifier.contact_delay(), std::time::Duration::ZERO);
    assert_eq!(result.status, VerificationStatus::NeedsReview);
    assert!((result.confidence.unwrap() - 0.7).abs() < 1e-9);
    assert_eq!(result.company_name.as_deref(), Some("Globex"));
}

#[tokio::test]
async fn test_fifty_percent_is_outdated_whichever_issues_produce_it() {
    let assessor = DataQualityAssessor::new(false, None);
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();

    // company (0.2) + title (0.1)
    let no_company_or_title = Contact::new("003A", "Jane Doe");
    // name (0.3)
    let short_name = Contact::new("003B", "J")
        .with_company("Acme")
        .with_title("CTO");

    for contact in [no_company_or_title, short_name] {
        let result = assessor.assess_as_of(&contact, now).await;
        assert_eq!(result.confidence, Some(0.5), "{}", contact.id);
        assert_eq!(result.status, VerificationStatus::Outdated, "{}", contact.id);
        assert!(result.notes.starts_with("Data quality: POOR."));
        assert!(result.notes.ends_with("Confidence: 50%"));
    }
}
