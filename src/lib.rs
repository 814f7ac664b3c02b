//! Contact Verifier - CRM contact freshness verification.
//!
//! This library checks whether contact records held in a CRM are still
//! current, either by cross-referencing public professional-network search
//! results or by assessing the record's own data quality, and writes the
//! outcome back to the CRM in rate-limited batches.
//!
//! # Architecture
//!
//! - **models**: Contacts, search candidates, verification results and write-back payloads
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the CRM REST API
//! - **repositories**: Contact access behind a trait
//! - **rate_limit**: Minimum spacing of outbound operations
//! - **search**: Multi-engine profile search through a headless browser
//! - **matching**: Name and company classification of search candidates
//! - **quality**: Data-quality assessment with advisory MX checks
//! - **persistence**: Chunked, failure-isolated write-back
//! - **report**: Run summaries, insights and the JSON audit artifact
//! - **services**: Verifiers and run orchestration
//! - **server**: MCP protocol server exposing the same operations as tools

pub mod bootstrap;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod quality;
pub mod rate_limit;
pub mod report;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;

pub use client::{CrmClient, StaleContactQuery};
pub use config::Config;
pub use error::{ConfigError, CrmApiError, ReportError, SearchError, VerificationError};
pub use matching::{Classification, MatchClassifier};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{
    BatchOutcome, Contact, SearchCandidate, VerificationResult, VerificationStatus,
    VerificationUpdate,
};
pub use rate_limit::RateLimiter;
pub use report::{ReportAggregator, RunSummary, VerificationMode, VerificationReport};
pub use server::VerifierMcpServer;
