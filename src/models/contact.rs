//! Contact model representing a person record held in the CRM.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account lookup nested in a CRM contact record.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct AccountRef {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// Raw contact row as returned by the CRM query endpoint.
///
/// Field names follow the CRM's API names; [`Contact`] is the cleaned-up
/// form the rest of the crate works with.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CrmContactRecord {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Title")]
    pub title: Option<String>,

    #[serde(rename = "Email")]
    pub email: Option<String>,

    #[serde(rename = "Account")]
    pub account: Option<AccountRef>,

    #[serde(rename = "Last_Verified__c")]
    pub last_verified: Option<String>,

    #[serde(rename = "LastModifiedDate")]
    pub last_modified: Option<String>,
}

/// A contact to be verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    /// Opaque CRM identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Primary email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Date of the last verification (YYYY-MM-DD), if ever verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_verified: Option<String>,

    /// When the record was last modified in the CRM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Contact {
    /// Create a new contact with minimal required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    /// Company name, or `None` when missing or blank.
    pub fn company_name(&self) -> Option<&str> {
        non_blank(self.company.as_deref())
    }

    /// Job title, or `None` when missing or blank.
    pub fn job_title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Email address, or `None` when missing or blank.
    pub fn email_address(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Parse the last-modified timestamp.
    ///
    /// Accepts RFC 3339 as well as the CRM's `2024-01-15T10:30:00.000+0000` form.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_modified.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Parse the last-verified date.
    pub fn last_verified_on(&self) -> Option<NaiveDate> {
        let raw = self.last_verified.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

impl From<CrmContactRecord> for Contact {
    fn from(record: CrmContactRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.unwrap_or_default().trim().to_string(),
            company: record.account.and_then(|account| account.name),
            title: record.title,
            email: record.email,
            last_verified: record.last_verified,
            last_modified: record.last_modified,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_contact_new() {
        let contact = Contact::new("003A", "Jane Doe");
        assert_eq!(contact.id, "003A");
        assert_eq!(contact.name, "Jane Doe");
        assert!(contact.company_name().is_none());
    }

    #[test]
    fn test_blank_fields_read_as_missing() {
        let contact = Contact::new("003A", "Jane Doe")
            .with_company("  ")
            .with_title("")
            .with_email(" jane@acme.com ");
        assert!(contact.company_name().is_none());
        assert!(contact.job_title().is_none());
        assert_eq!(contact.email_address(), Some("jane@acme.com"));
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "attributes": {"type": "Contact"},
            "Id": "003A",
            "Name": "Jane Doe",
            "Title": "CTO",
            "Email": "jane@acme.com",
            "Account": {"attributes": {"type": "Account"}, "Name": "Acme"},
            "Last_Verified__c": null,
            "LastModifiedDate": "2024-01-15T10:30:00.000+0000"
        }"#;
        let record: CrmContactRecord = serde_json::from_str(json).unwrap();
        let contact = Contact::from(record);

        assert_eq!(contact.id, "003A");
        assert_eq!(contact.company_name(), Some("Acme"));
        assert_eq!(contact.job_title(), Some("CTO"));
        assert!(contact.last_verified.is_none());

        let modified = contact.last_modified_at().unwrap();
        assert_eq!(modified.year(), 2024);
        assert_eq!(modified.hour(), 10);
    }

    #[test]
    fn test_record_without_account() {
        let json = r#"{"Id": "003B", "Name": "John Roe", "Account": null}"#;
        let record: CrmContactRecord = serde_json::from_str(json).unwrap();
        let contact = Contact::from(record);
        assert!(contact.company.is_none());
        assert!(contact.last_modified_at().is_none());
    }

    #[test]
    fn test_last_modified_rfc3339() {
        let contact = Contact::new("1", "A B").with_last_modified("2023-06-01T00:00:00Z");
        assert_eq!(contact.last_modified_at().unwrap().month(), 6);
    }

    #[test]
    fn test_last_verified_date() {
        let mut contact = Contact::new("1", "A B");
        contact.last_verified = Some("2024-03-09".to_string());
        assert_eq!(
            contact.last_verified_on(),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }
}
