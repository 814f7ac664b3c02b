//! Data-quality assessment of a contact's intrinsic fields.
//!
//! Every detected issue subtracts a fixed penalty from a starting confidence
//! of 0.8 and adds one issue and one recommendation. The resulting notes are
//! deterministic so they can be written back to the CRM and compared in tests.

use crate::domain::EmailAddress;
use crate::models::{Contact, VerificationResult, VerificationStatus};
use crate::quality::mail_domain::MailDomainChecker;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;

// Confidence is tracked in whole percentage points so equal scores compare equal.
const BASE_CONFIDENCE: i32 = 80;
const NAME_PENALTY: i32 = 30;
const COMPANY_PENALTY: i32 = 20;
const TITLE_PENALTY: i32 = 10;
const EMAIL_PENALTY: i32 = 20;
const STALE_PENALTY: i32 = 10;

/// `NEEDS_REVIEW` requires confidence strictly above this.
const REVIEW_THRESHOLD: i32 = 50;

/// Records unmodified for longer than this are flagged.
const STALE_AFTER_DAYS: i64 = 365;

/// Overall data-quality label used in notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityLabel {
    Good,
    NeedsReview,
    Poor,
}

impl QualityLabel {
    fn for_status(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Confirmed => Self::Good,
            VerificationStatus::NeedsReview => Self::NeedsReview,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Good => "GOOD",
            Self::NeedsReview => "NEEDS REVIEW",
            Self::Poor => "POOR",
        };
        f.write_str(label)
    }
}

/// Accumulates issues, recommendations and confidence for one contact.
struct Findings {
    points: i32,
    issues: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn new() -> Self {
        Self {
            points: BASE_CONFIDENCE,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn flag(&mut self, penalty: i32, issue: &str, recommendation: &str) {
        self.points -= penalty;
        self.issues.push(issue.to_string());
        self.recommendations.push(recommendation.to_string());
    }
}

/// Scores contacts from their own fields plus an optional MX check.
pub struct DataQualityAssessor {
    validate_email: bool,
    mail_checker: Option<Arc<dyn MailDomainChecker>>,
}

impl DataQualityAssessor {
    pub fn new(validate_email: bool, mail_checker: Option<Arc<dyn MailDomainChecker>>) -> Self {
        Self {
            validate_email,
            mail_checker,
        }
    }

    /// Assess a contact against the current time.
    pub async fn assess(&self, contact: &Contact) -> VerificationResult {
        self.assess_as_of(contact, Utc::now()).await
    }

    /// Assess a contact, measuring record age against `now`.
    pub async fn assess_as_of(&self, contact: &Contact, now: DateTime<Utc>) -> VerificationResult {
        let mut findings = Findings::new();

        if contact.name.trim().chars().count() < 2 {
            findings.flag(
                NAME_PENALTY,
                "Missing or incomplete name",
                "Add the contact's full name",
            );
        }
        if contact.company_name().is_none() {
            findings.flag(
                COMPANY_PENALTY,
                "Missing company",
                "Add the contact's current company",
            );
        }
        if contact.job_title().is_none() {
            findings.flag(
                TITLE_PENALTY,
                "Missing job title",
                "Add the contact's current job title",
            );
        }
        if self.validate_email {
            if let Some(email) = contact.email_address() {
                if let Some(issue) = self.email_issue(email).await {
                    findings.flag(
                        EMAIL_PENALTY,
                        issue,
                        "Confirm the contact's current email address",
                    );
                }
            }
        }
        if let Some(modified) = contact.last_modified_at() {
            if now - modified > Duration::days(STALE_AFTER_DAYS) {
                findings.flag(
                    STALE_PENALTY,
                    "Record not updated in over 12 months",
                    "Review the record for recent changes",
                );
            }
        }

        let points = findings.points.clamp(0, 100);
        let confidence = f64::from(points) / 100.0;
        let status = match findings.issues.len() {
            0 => VerificationStatus::Confirmed,
            n if n <= 2 && points > REVIEW_THRESHOLD => VerificationStatus::NeedsReview,
            _ => VerificationStatus::Outdated,
        };
        let notes = format_notes(
            QualityLabel::for_status(status),
            &findings.issues,
            &findings.recommendations,
            confidence,
        );

        let mut result = VerificationResult::for_contact(contact, status, notes);
        result.confidence = Some(confidence);
        result.issues = findings.issues;
        result.recommendations = findings.recommendations;
        result
    }

    async fn email_issue(&self, email: &str) -> Option<&'static str> {
        let parsed = match EmailAddress::parse(email) {
            Ok(parsed) => parsed,
            Err(_) => return Some("Invalid email address format"),
        };

        match self.mail_checker {
            Some(ref checker) if !checker.has_mail_servers(parsed.domain()).await => {
                Some("Invalid email domain (no mail servers)")
            }
            _ => None,
        }
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join("; ")
    }
}

fn format_notes(
    label: QualityLabel,
    issues: &[String],
    recommendations: &[String],
    confidence: f64,
) -> String {
    format!(
        "Data quality: {}. Issues: {}. Recommendations: {}. Confidence: {}%",
        label,
        join_or_none(issues),
        join_or_none(recommendations),
        (confidence * 100.0).round() as u32
    )
}
