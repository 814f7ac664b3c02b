//! Verification outcomes: statuses, search candidates, per-contact results,
//! batch write outcomes and the CRM write-back payload.

use crate::models::Contact;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of the notes field accepted by the CRM.
pub const MAX_NOTES_LEN: usize = 32_000;

/// Outcome of checking a contact's currency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Confirmed,
    Outdated,
    Unknown,
    NeedsReview,
    Error,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 5] = [
        VerificationStatus::Confirmed,
        VerificationStatus::Outdated,
        VerificationStatus::Unknown,
        VerificationStatus::NeedsReview,
        VerificationStatus::Error,
    ];

    /// Report/wire name, e.g. `NEEDS_REVIEW`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Outdated => "OUTDATED",
            Self::Unknown => "UNKNOWN",
            Self::NeedsReview => "NEEDS_REVIEW",
            Self::Error => "ERROR",
        }
    }

    /// Picklist value written to the CRM status field.
    ///
    /// The CRM only knows four values; failed verifications are stored as
    /// `Unknown` and carry the failure in the notes field.
    pub fn crm_value(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Outdated => "Outdated",
            Self::Unknown | Self::Error => "Unknown",
            Self::NeedsReview => "Needs Review",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unconfirmed profile reference extracted from a search result page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCandidate {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchCandidate {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// The single output artifact of verifying one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationResult {
    pub contact_id: String,
    pub contact_name: String,
    pub company_name: Option<String>,
    pub status: VerificationStatus,
    /// Only produced by the data-quality path
    pub confidence: Option<f64>,
    pub notes: String,
    pub source_url: Option<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl VerificationResult {
    /// Result skeleton for a contact; callers fill in the outcome fields.
    pub fn for_contact(contact: &Contact, status: VerificationStatus, notes: String) -> Self {
        Self {
            contact_id: contact.id.clone(),
            contact_name: contact.name.clone(),
            company_name: contact.company_name().map(str::to_string),
            status,
            confidence: None,
            notes,
            source_url: None,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// `ERROR` result for a contact whose verification failed.
    pub fn failed(contact: &Contact, error: &dyn fmt::Display) -> Self {
        Self::for_contact(
            contact,
            VerificationStatus::Error,
            format!("Verification failed: {}", error),
        )
    }
}

/// Aggregate result of persisting a run's results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
}

impl BatchOutcome {
    /// Outcome where every item counts as written.
    pub fn all_succeeded(count: usize) -> Self {
        Self {
            success_count: count,
            error_count: 0,
            errors: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, message: String) {
        self.error_count += 1;
        self.errors.push(message);
    }
}

/// Fields written back to the CRM for one contact.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationUpdate {
    pub contact_id: String,
    pub status: VerificationStatus,
    pub notes: String,
    pub verified_on: NaiveDate,
    pub source_url: Option<String>,
}

impl VerificationUpdate {
    pub fn from_result(result: &VerificationResult, verified_on: NaiveDate) -> Self {
        let notes = if result.notes.chars().count() > MAX_NOTES_LEN {
            result.notes.chars().take(MAX_NOTES_LEN).collect()
        } else {
            result.notes.clone()
        };

        Self {
            contact_id: result.contact_id.clone(),
            status: result.status,
            notes,
            verified_on,
            source_url: result.source_url.clone(),
        }
    }

    /// JSON body for the CRM PATCH request.
    pub fn to_crm_fields(&self) -> serde_json::Value {
        let mut fields = serde_json::json!({
            "Verification_Status__c": self.status.crm_value(),
            "Verification_Notes__c": self.notes,
            "Last_Verified__c": self.verified_on.format("%Y-%m-%d").to_string(),
        });
        if let Some(ref url) = self.source_url {
            fields["Verification_Source__c"] = serde_json::Value::String(url.clone());
        }
        fields
    }
}
