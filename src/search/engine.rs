//! Ordered multi-engine search with fallback.

use crate::error::{SearchError, SearchResult};
use crate::metrics::Metrics;
use crate::models::SearchCandidate;
use crate::rate_limit::RateLimiter;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of candidates returned for one person.
pub const MAX_CANDIDATES: usize = 5;

/// A professional-network-scoped query for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    name: String,
    company: Option<String>,
}

impl SearchQuery {
    /// Build a query, rejecting an empty person name.
    pub fn new(name: &str, company: Option<&str>) -> SearchResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SearchError::InvalidQuery(
                "person name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            company: company
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Query text, e.g. `"Jane Doe" "Acme" site:linkedin.com/in`.
    pub fn to_query_string(&self) -> String {
        match self.company {
            Some(ref company) => format!("\"{}\" \"{}\" site:linkedin.com/in", self.name, company),
            None => format!("\"{}\" site:linkedin.com/in", self.name),
        }
    }
}

/// One search strategy.
///
/// Implementations report strategy-local failures as errors; the engine logs
/// them and moves on.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Engine name for logs.
    fn name(&self) -> &str;

    /// Run the query and extract profile candidates.
    async fn attempt(&self, query: &SearchQuery) -> SearchResult<Vec<SearchCandidate>>;
}

/// Randomized pause applied before each strategy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDelay {
    pub min: Duration,
    pub max: Duration,
}

impl SearchDelay {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms.max(min_ms)),
        }
    }

    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    /// Pick a pause uniformly within the range.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

impl Default for SearchDelay {
    fn default() -> Self {
        Self::from_millis(1000, 3000)
    }
}

/// Tries each backend in priority order until one yields candidates.
pub struct SearchEngine {
    backends: Vec<Arc<dyn SearchBackend>>,
    limiter: Arc<RateLimiter>,
    delay: SearchDelay,
    metrics: Metrics,
}

impl SearchEngine {
    pub fn new(
        backends: Vec<Arc<dyn SearchBackend>>,
        limiter: Arc<RateLimiter>,
        delay: SearchDelay,
        metrics: Metrics,
    ) -> Self {
        Self {
            backends,
            limiter,
            delay,
            metrics,
        }
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Search for a person, returning at most [`MAX_CANDIDATES`] candidates.
    ///
    /// Exhausting every backend without a candidate yields an empty list.
    /// Only an empty person name is an error.
    pub async fn search(
        &self,
        name: &str,
        company: Option<&str>,
    ) -> SearchResult<Vec<SearchCandidate>> {
        let query = SearchQuery::new(name, company)?;

        for backend in &self.backends {
            self.limiter.throttle().await;
            let pause = self.delay.sample();
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }

            match backend.attempt(&query).await {
                Ok(mut candidates) if !candidates.is_empty() => {
                    self.metrics.record_search_attempt(candidates.len());
                    candidates.truncate(MAX_CANDIDATES);
                    tracing::debug!(
                        engine = backend.name(),
                        person = query.name(),
                        candidates = candidates.len(),
                        "Search strategy produced candidates"
                    );
                    return Ok(candidates);
                }
                Ok(_) => {
                    self.metrics.record_search_attempt(0);
                    tracing::debug!(
                        engine = backend.name(),
                        person = query.name(),
                        "Search strategy found no candidates"
                    );
                }
                Err(e) => {
                    self.metrics.record_search_failure();
                    tracing::warn!(
                        engine = backend.name(),
                        person = query.name(),
                        error = %e,
                        "Search strategy failed, trying next"
                    );
                }
            }
        }

        tracing::debug!(person = query.name(), "All search strategies exhausted");
        Ok(Vec::new())
    }
}
