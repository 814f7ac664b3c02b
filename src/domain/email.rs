//! EmailAddress value object.

use super::errors::ValidationError;
use std::fmt;

/// A syntactically valid email address, split into its local part and a
/// lowercased mail domain.
///
/// # Example
///
/// ```
/// use contact_verifier::domain::EmailAddress;
///
/// let email = EmailAddress::parse(" Jane.Doe@Acme.COM ").unwrap();
/// assert_eq!(email.domain(), "acme.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    /// Parse an address, trimming surrounding whitespace.
    ///
    /// Requires exactly one `@`, a non-empty local part, and a dotted domain
    /// with no empty labels.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let invalid = || ValidationError::InvalidEmail(trimmed.to_string());

        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') || local.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let domain = domain.trim_end_matches('.').to_lowercase();
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            local: local.to_string(),
            domain,
        })
    }

    pub fn local_part(&self) -> &str {
        &self.local
    }

    /// Lowercased mail domain, e.g. `acme.com`.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}
