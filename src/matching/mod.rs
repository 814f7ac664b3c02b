//! Candidate matching for contact verification.
//!
//! This module scores the best search candidate against a contact's name and
//! company and turns the outcome into a verification status.

pub mod classifier;

pub use classifier::{name_tokens, Classification, MatchClassifier};
