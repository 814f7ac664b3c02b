//! Data models for contacts and verification outcomes.

pub mod contact;
pub mod verification;

pub use contact::{AccountRef, Contact, CrmContactRecord};
pub use verification::{
    BatchOutcome, SearchCandidate, VerificationResult, VerificationStatus, VerificationUpdate,
};
