//! Test doubles shared by the integration tests.

#![allow(dead_code)]

mod mock_contact_repository;
mod mock_mail_domain_checker;
mod mock_search_backend;

pub use mock_contact_repository::MockContactRepository;
pub use mock_mail_domain_checker::MockMailDomainChecker;
pub use mock_search_backend::MockSearchBackend;
