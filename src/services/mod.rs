//! Application service layer.
//!
//! Verifiers turn one contact into one result; the verification service
//! orchestrates a whole run against the CRM. Both the CLI and the MCP
//! handlers call into this layer.

mod verification_service;
mod verifier;

pub use verification_service::{RunOptions, VerificationRun, VerificationService};
pub use verifier::{ContactVerifier, PersonCheck, QualityVerifier, SearchVerifier};
