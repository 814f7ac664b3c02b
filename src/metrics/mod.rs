//! Run metrics.
//!
//! Counters for CRM traffic, search attempts and batch writes. Cloning a
//! [`Metrics`] shares the underlying counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector shared by the CRM client, the search engine and the
/// batch writer.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    crm_requests_total: AtomicU64,
    crm_errors_total: AtomicU64,
    crm_duration_total_ms: AtomicU64,
    contacts_fetched_total: AtomicU64,
    search_attempts_total: AtomicU64,
    search_failures_total: AtomicU64,
    candidates_found_total: AtomicU64,
    writes_succeeded_total: AtomicU64,
    writes_failed_total: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a CRM HTTP request with its duration.
    pub fn record_crm_request(&self, duration: Duration, success: bool) {
        self.inner.crm_requests_total.fetch_add(1, Ordering::Relaxed);
        self.inner
            .crm_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        if !success {
            self.inner.crm_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_contacts_fetched(&self, count: usize) {
        self.inner
            .contacts_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record one strategy attempt and the number of candidates it produced.
    pub fn record_search_attempt(&self, candidates: usize) {
        self.inner.search_attempts_total.fetch_add(1, Ordering::Relaxed);
        self.inner
            .candidates_found_total
            .fetch_add(candidates as u64, Ordering::Relaxed);
    }

    /// Record a strategy attempt that errored.
    pub fn record_search_failure(&self) {
        self.inner.search_attempts_total.fetch_add(1, Ordering::Relaxed);
        self.inner.search_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self, success: bool) {
        let counter = if success {
            &self.inner.writes_succeeded_total
        } else {
            &self.inner.writes_failed_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Average CRM request duration in milliseconds.
    pub fn crm_duration_avg_ms(&self) -> f64 {
        let total = self.inner.crm_duration_total_ms.load(Ordering::Relaxed);
        let count = self.inner.crm_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        MetricsSummary {
            crm_requests_total: load(&self.inner.crm_requests_total),
            crm_errors_total: load(&self.inner.crm_errors_total),
            crm_duration_avg_ms: self.crm_duration_avg_ms(),
            contacts_fetched_total: load(&self.inner.contacts_fetched_total),
            search_attempts_total: load(&self.inner.search_attempts_total),
            search_failures_total: load(&self.inner.search_failures_total),
            candidates_found_total: load(&self.inner.candidates_found_total),
            writes_succeeded_total: load(&self.inner.writes_succeeded_total),
            writes_failed_total: load(&self.inner.writes_failed_total),
        }
    }

    /// Emit the current counters as a single structured log line.
    pub fn log_summary(&self) {
        let s = self.summary();
        tracing::info!(
            crm_requests = s.crm_requests_total,
            crm_errors = s.crm_errors_total,
            crm_avg_ms = s.crm_duration_avg_ms,
            contacts_fetched = s.contacts_fetched_total,
            search_attempts = s.search_attempts_total,
            search_failures = s.search_failures_total,
            candidates = s.candidates_found_total,
            writes_ok = s.writes_succeeded_total,
            writes_failed = s.writes_failed_total,
            "Run metrics"
        );
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub crm_requests_total: u64,
    pub crm_errors_total: u64,
    pub crm_duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
    pub search_attempts_total: u64,
    pub search_failures_total: u64,
    pub candidates_found_total: u64,
    pub writes_succeeded_total: u64,
    pub writes_failed_total: u64,
}
