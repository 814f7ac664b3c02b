//! Async wrapper around synchronous CrmClient.
//!
//! This module provides an async interface to the synchronous CrmClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{CrmClient, StaleContactQuery};
use crate::error::{CrmApiError, CrmApiResult};
use crate::models::{Contact, VerificationUpdate};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for CRM client operations.
#[async_trait]
pub trait AsyncCrmClient: Send + Sync {
    async fn check_connection(&self) -> CrmApiResult<()>;
    async fn query_stale_contacts(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>>;
    async fn update_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()>;
}

/// Async wrapper around synchronous CrmClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncCrmClientImpl {
    client: Arc<CrmClient>,
}

impl AsyncCrmClientImpl {
    pub fn new(client: CrmClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> CrmApiError {
    CrmApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncCrmClient for AsyncCrmClientImpl {
    async fn check_connection(&self) -> CrmApiResult<()> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.check_connection())
            .await
            .map_err(join_error)?
    }

    async fn query_stale_contacts(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>> {
        let client = self.client.clone();
        let query = query.clone();

        tokio::task::spawn_blocking(move || client.query_stale_contacts(&query))
            .await
            .map_err(join_error)?
    }

    async fn update_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()> {
        let client = self.client.clone();
        let update = update.clone();

        tokio::task::spawn_blocking(move || client.update_verification(&update))
            .await
            .map_err(join_error)?
    }
}
