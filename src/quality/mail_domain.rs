//! Advisory MX checks for email domains.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Answers whether a mail domain can receive email.
#[async_trait]
pub trait MailDomainChecker: Send + Sync {
    /// `true` when the domain publishes at least one MX record.
    ///
    /// Lookup failures count as `false`.
    async fn has_mail_servers(&self, domain: &str) -> bool;
}

/// MX lookups through the default resolver configuration, cached per domain
/// for the life of the checker.
pub struct DnsMailDomainChecker {
    resolver: TokioAsyncResolver,
    cache: RwLock<HashMap<String, bool>>,
}

impl DnsMailDomainChecker {
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Cached answer for a domain, if it has been looked up.
    pub fn cached(&self, domain: &str) -> Option<bool> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache.get(&domain.to_lowercase()).copied()
    }

    fn remember(&self, domain: String, has_mx: bool) {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(domain, has_mx);
    }
}

impl Default for DnsMailDomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailDomainChecker for DnsMailDomainChecker {
    async fn has_mail_servers(&self, domain: &str) -> bool {
        let domain = domain.trim().trim_end_matches('.').to_lowercase();
        if let Some(has_mx) = self.cached(&domain) {
            return has_mx;
        }

        let has_mx = match self.resolver.mx_lookup(format!("{}.", domain)).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                tracing::debug!(target: "mail_domain", "MX lookup for {} failed: {}", domain, e);
                false
            }
        };

        tracing::debug!(target: "mail_domain", "MX records for {}: {}", domain, has_mx);
        self.remember(domain, has_mx);
        has_mx
    }
}
