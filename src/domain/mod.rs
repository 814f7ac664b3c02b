//! Domain value objects.
//!
//! Type-safe wrappers that validate at construction time so invalid data
//! never reaches the verifiers.

pub mod email;
pub mod errors;

pub use email::EmailAddress;
pub use errors::ValidationError;
