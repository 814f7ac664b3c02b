use async_trait::async_trait;
use contact_verifier::quality::MailDomainChecker;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mail domain checker that only knows an explicit set of valid domains.
#[derive(Clone, Default)]
pub struct MockMailDomainChecker {
    valid_domains: HashSet<String>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockMailDomainChecker {
    pub fn with_valid(domains: &[&str]) -> Self {
        Self {
            valid_domains: domains.iter().map(|d| d.to_string()).collect(),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailDomainChecker for MockMailDomainChecker {
    async fn has_mail_servers(&self, domain: &str) -> bool {
        self.lookups.lock().unwrap().push(domain.to_string());
        self.valid_domains.contains(domain)
    }
}
