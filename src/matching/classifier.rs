//! Name and company matching against search candidates.
//!
//! Matching is intentionally loose: a name token matches when it appears
//! anywhere in the candidate text or overlaps a text token by containment.

use crate::models::{SearchCandidate, VerificationStatus};
use crate::search::normalize_text;

/// Outcome of classifying a contact against its search candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: VerificationStatus,
    pub notes: String,
    pub source_url: Option<String>,
}

/// Lowercase alphanumeric runs longer than one character.
pub fn name_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Classifies the best candidate for a contact.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchClassifier;

impl MatchClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a contact against candidates ordered best first.
    ///
    /// # Returns
    /// * `CONFIRMED` when name and company both match the first candidate
    /// * `OUTDATED` when only the name matches
    /// * `UNKNOWN` when there are no candidates or the name does not match
    pub fn classify(
        &self,
        contact_name: &str,
        company_name: Option<&str>,
        candidates: &[SearchCandidate],
    ) -> Classification {
        let Some(best) = candidates.first() else {
            return Classification {
                status: VerificationStatus::Unknown,
                notes: "Could not find contact in public search results".to_string(),
                source_url: None,
            };
        };

        if !self.name_matches(contact_name, best) {
            return Classification {
                status: VerificationStatus::Unknown,
                notes: "Found results but could not confirm match".to_string(),
                source_url: None,
            };
        }

        if self.company_matches(company_name, best) {
            Classification {
                status: VerificationStatus::Confirmed,
                notes: format!("Confirmed via public profile: {}", best.title),
                source_url: Some(best.url.clone()),
            }
        } else {
            Classification {
                status: VerificationStatus::Outdated,
                notes: format!(
                    "Person found but may have changed companies. Latest profile: {}",
                    best.title
                ),
                source_url: Some(best.url.clone()),
            }
        }
    }

    /// Every name token appears in the candidate title or snippet.
    pub fn name_matches(&self, contact_name: &str, candidate: &SearchCandidate) -> bool {
        let tokens = name_tokens(contact_name);
        if tokens.is_empty() {
            return false;
        }

        let text = normalize_text(&format!("{} {}", candidate.title, candidate.snippet));
        let text_tokens = name_tokens(&text);

        tokens.iter().all(|token| {
            text.contains(token.as_str())
                || text_tokens
                    .iter()
                    .any(|word| word.contains(token.as_str()) || token.contains(word.as_str()))
        })
    }

    /// The company name appears in the candidate snippet.
    pub fn company_matches(&self, company_name: Option<&str>, candidate: &SearchCandidate) -> bool {
        let company = match company_name.map(normalize_text) {
            Some(company) if !company.is_empty() => company,
            _ => return false,
        };
        normalize_text(&candidate.snippet).contains(&company)
    }
}
