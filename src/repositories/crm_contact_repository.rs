use crate::client::{AsyncCrmClient, StaleContactQuery};
use crate::error::CrmApiResult;
use crate::models::{Contact, VerificationUpdate};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact repository implementation using the CRM API client.
///
/// This repository delegates all operations to the AsyncCrmClient.
pub struct CrmContactRepository {
    client: Arc<dyn AsyncCrmClient>,
}

impl CrmContactRepository {
    /// Create a new CrmContactRepository with the given client.
    pub fn new(client: Arc<dyn AsyncCrmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactRepository for CrmContactRepository {
    async fn check_connection(&self) -> CrmApiResult<()> {
        self.client.check_connection().await
    }

    async fn find_unverified(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>> {
        let mut contacts = self.client.query_stale_contacts(query).await?;
        contacts.truncate(query.limit);
        Ok(contacts)
    }

    async fn write_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()> {
        self.client.update_verification(update).await
    }
}
