//! HTTP client for the CRM REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client sends the pre-established bearer token,
//! maps HTTP failures to [`CrmApiError`], and follows query pagination.

mod async_wrapper;
pub use async_wrapper::{AsyncCrmClient, AsyncCrmClientImpl};

use crate::config::Config;
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use crate::models::{Contact, CrmContactRecord, VerificationUpdate};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Selection criteria for contacts due for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleContactQuery {
    /// Maximum number of contacts to return
    pub limit: usize,

    /// Contacts verified within this many months are excluded
    pub months: u32,
}

impl StaleContactQuery {
    /// SOQL for contacts never verified or verified before the window,
    /// most recently modified first.
    pub fn to_soql(&self) -> String {
        format!(
            "SELECT Id, Name, Title, Email, Account.Name, Last_Verified__c, LastModifiedDate \
             FROM Contact \
             WHERE (Last_Verified__c = null OR Last_Verified__c < LAST_N_MONTHS:{}) \
             ORDER BY LastModifiedDate DESC \
             LIMIT {}",
            self.months, self.limit
        )
    }
}

/// One page of a CRM query response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse<T> {
    /// Total rows matching the query
    #[serde(default)]
    pub total_size: usize,

    /// Whether this is the last page
    #[serde(default = "default_done")]
    pub done: bool,

    /// Relative URL of the next page
    #[serde(default)]
    pub next_records_url: Option<String>,

    /// Rows on this page
    pub records: Vec<T>,
}

fn default_done() -> bool {
    true
}

/// HTTP client for the CRM REST API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct CrmClient {
    /// Instance base URL
    base_url: String,

    /// Bearer token
    access_token: String,

    /// REST API version segment, e.g. `v59.0`
    api_version: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CrmClient {
    /// Create a new CrmClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.crm_instance_url.clone(),
            access_token: config.crm_access_token.clone(),
            api_version: config.crm_api_version.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a CrmClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            access_token,
            api_version: "v59.0".to_string(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Path prefix for the configured API version.
    fn api_path(&self, suffix: &str) -> String {
        format!(
            "/services/data/{}/{}",
            self.api_version,
            suffix.trim_start_matches('/')
        )
    }

    /// Execute a request with authentication, recording metrics.
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> CrmApiResult<ureq::Response> {
        let start = Instant::now();
        let url = self.build_url(path);
        tracing::debug!("{} {}", method, url);

        let request = self
            .agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .set("Accept", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        self.metrics
            .record_crm_request(start.elapsed(), result.is_ok());
        if let Err(ref e) = result {
            tracing::debug!("{} {} - Error: {}", method, url, e);
        }

        result
    }

    /// Map a ureq error to a CrmApiError.
    fn map_error(&self, error: ureq::Error) -> CrmApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => CrmApiError::Unauthorized,
                    404 => CrmApiError::NotFound(message),
                    429 => CrmApiError::RateLimitExceeded,
                    400 => CrmApiError::InvalidRequest(message),
                    _ => CrmApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    CrmApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    CrmApiError::Timeout
                } else {
                    CrmApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Check that the instance is reachable and the token is accepted.
    pub fn check_connection(&self) -> CrmApiResult<()> {
        self.send("GET", &self.api_path(""), None)?;
        Ok(())
    }

    /// Fetch contacts due for verification, following `nextRecordsUrl`.
    pub fn query_stale_contacts(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>> {
        let soql = query.to_soql();
        let mut path = self.api_path(&format!("query?q={}", urlencoding::encode(&soql)));
        let mut contacts = Vec::new();

        loop {
            let response = self.send("GET", &path, None)?;
            let body = response
                .into_string()
                .map_err(|e| CrmApiError::HttpError(e.to_string()))?;
            let page: QueryResponse<CrmContactRecord> =
                serde_json::from_str(&body).map_err(CrmApiError::JsonError)?;

            tracing::debug!(
                "Query page: {} records (total {})",
                page.records.len(),
                page.total_size
            );
            contacts.extend(page.records.into_iter().map(Contact::from));

            match page.next_records_url {
                Some(next) if !page.done && contacts.len() < query.limit => path = next,
                _ => break,
            }
        }

        contacts.truncate(query.limit);
        self.metrics.record_contacts_fetched(contacts.len());
        Ok(contacts)
    }

    /// Write the verification fields for one contact.
    pub fn update_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()> {
        if update.contact_id.trim().is_empty() {
            return Err(CrmApiError::InvalidRequest(
                "Contact ID cannot be empty".to_string(),
            ));
        }

        let path = self.api_path(&format!(
            "sobjects/Contact/{}",
            urlencoding::encode(&update.contact_id)
        ));
        self.send("PATCH", &path, Some(&update.to_crm_fields()))?;
        Ok(())
    }
}
