//! Error types for the contact verifier.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Each concern gets its own enum so callers can tell a fatal CRM failure apart from
//! a recoverable search or per-contact failure.

use thiserror::Error;

/// Errors that can occur when interacting with the CRM REST API.
#[derive(Error, Debug)]
pub enum CrmApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Access token rejected
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by a single search strategy or by the search engine itself.
///
/// Strategy errors never abort a run: the strategy engine logs them and moves
/// on to the next backend.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query cannot be searched (e.g. the person has no name)
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// WebDriver session could not be created or was lost
    #[error("Browser session error: {0}")]
    Browser(String),

    /// Navigation to the result page failed
    #[error("{engine} navigation failed: {message}")]
    Navigation { engine: String, message: String },

    /// Navigation did not complete within the configured bound
    #[error("{engine} navigation timed out after {seconds}s")]
    Timeout { engine: String, seconds: u64 },

    /// Result page could not be read
    #[error("{engine} extraction failed: {message}")]
    Extraction { engine: String, message: String },
}

/// Errors that can occur while verifying contacts.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// CRM is unreachable or rejected the query (fatal for a run)
    #[error("CRM error: {0}")]
    Crm(#[from] CrmApiError),

    /// Search could not be performed for a contact
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// The contact record cannot be verified
    #[error("Invalid contact: {0}")]
    InvalidContact(String),
}

/// Errors that can occur while writing the report artifact.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Report directory or file could not be written
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be serialized
    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CrmApiError
pub type CrmApiResult<T> = Result<T, CrmApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with VerificationError
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Convenience type alias for Results with ReportError
pub type ReportResult<T> = Result<T, ReportError>;
