use crate::client::StaleContactQuery;
use crate::error::CrmApiResult;
use crate::models::{Contact, VerificationUpdate};
use async_trait::async_trait;

/// Repository for reading contacts due for verification and writing back
/// verification outcomes.
///
/// Provides abstraction over the CRM, enabling different implementations
/// (API client, mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Verify the CRM is reachable and accepts our credentials.
    async fn check_connection(&self) -> CrmApiResult<()>;

    /// Contacts not verified within the query window, most recently modified first.
    async fn find_unverified(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>>;

    /// Write the verification fields for one contact.
    async fn write_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()>;
}
