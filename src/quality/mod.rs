//! Data-quality verification without external search.

pub mod assessor;
pub mod mail_domain;

pub use assessor::{DataQualityAssessor, QualityLabel};
pub use mail_domain::{DnsMailDomainChecker, MailDomainChecker};
