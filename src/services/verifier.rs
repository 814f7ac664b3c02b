//! The two verification strategies behind one capability.

use crate::error::{SearchResult, VerifyResult};
use crate::matching::MatchClassifier;
use crate::models::{Contact, SearchCandidate, VerificationResult, VerificationStatus};
use crate::quality::DataQualityAssessor;
use crate::report::VerificationMode;
use crate::search::SearchEngine;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Produces exactly one result per contact.
#[async_trait]
pub trait ContactVerifier: Send + Sync {
    fn mode(&self) -> VerificationMode;

    /// Pause between consecutive contacts in a run.
    fn contact_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Verify one contact. Errors become `ERROR` results in the caller.
    async fn verify(&self, contact: &Contact) -> VerifyResult<VerificationResult>;
}

/// Outcome of an ad-hoc lookup that does not touch the CRM.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonCheck {
    pub name: String,
    pub company: Option<String>,
    pub status: VerificationStatus,
    pub notes: String,
    pub source_url: Option<String>,
    pub candidates: Vec<SearchCandidate>,
}

/// Verifies contacts against public search results.
pub struct SearchVerifier {
    engine: Arc<SearchEngine>,
    classifier: MatchClassifier,
    contact_delay: Duration,
}

impl SearchVerifier {
    pub fn new(engine: Arc<SearchEngine>, contact_delay: Duration) -> Self {
        Self {
            engine,
            classifier: MatchClassifier::new(),
            contact_delay,
        }
    }

    /// Search and classify a person by name and optional company.
    pub async fn check_person(&self, name: &str, company: Option<&str>) -> SearchResult<PersonCheck> {
        let candidates = self.engine.search(name, company).await?;
        let classification = self.classifier.classify(name, company, &candidates);

        Ok(PersonCheck {
            name: name.trim().to_string(),
            company: company.map(str::to_string),
            status: classification.status,
            notes: classification.notes,
            source_url: classification.source_url,
            candidates,
        })
    }
}

#[async_trait]
impl ContactVerifier for SearchVerifier {
    fn mode(&self) -> VerificationMode {
        VerificationMode::Search
    }

    fn contact_delay(&self) -> Duration {
        self.contact_delay
    }

    async fn verify(&self, contact: &Contact) -> VerifyResult<VerificationResult> {
        let company = contact.company_name();
        let candidates = self.engine.search(&contact.name, company).await?;
        let classification = self.classifier.classify(&contact.name, company, &candidates);

        let mut result =
            VerificationResult::for_contact(contact, classification.status, classification.notes);
        result.source_url = classification.source_url;
        Ok(result)
    }
}

/// Verifies contacts from their own fields only.
pub struct QualityVerifier {
    assessor: DataQualityAssessor,
}

impl QualityVerifier {
    pub fn new(assessor: DataQualityAssessor) -> Self {
        Self { assessor }
    }
}

#[async_trait]
impl ContactVerifier for QualityVerifier {
    fn mode(&self) -> VerificationMode {
        VerificationMode::DataQuality
    }

    async fn verify(&self, contact: &Contact) -> VerifyResult<VerificationResult> {
        Ok(self.assessor.assess(contact).await)
    }
}
