use crate::metrics::Metrics;
use crate::models::{BatchOutcome, VerificationResult, VerificationUpdate};
use crate::rate_limit::RateLimiter;
use crate::repositories::ContactRepository;
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use std::sync::Arc;

/// Writes verification results back to the CRM in sequential chunks.
///
/// Writes within a chunk run concurrently; the rate limiter is invoked once
/// per chunk. A failed write is recorded and never affects other items.
pub struct BatchWriter {
    repository: Arc<dyn ContactRepository>,
    limiter: Arc<RateLimiter>,
    batch_size: usize,
    metrics: Metrics,
}

impl BatchWriter {
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        limiter: Arc<RateLimiter>,
        batch_size: usize,
        metrics: Metrics,
    ) -> Self {
        Self {
            repository,
            limiter,
            batch_size: batch_size.max(1),
            metrics,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Persist results, stamped with today's UTC date.
    pub async fn persist(&self, results: &[VerificationResult], dry_run: bool) -> BatchOutcome {
        self.persist_on(results, dry_run, Utc::now().date_naive()).await
    }

    /// Persist results with an explicit verification date.
    pub async fn persist_on(
        &self,
        results: &[VerificationResult],
        dry_run: bool,
        verified_on: NaiveDate,
    ) -> BatchOutcome {
        if dry_run {
            tracing::info!("Dry run: skipping write-back of {} results", results.len());
            return BatchOutcome::all_succeeded(results.len());
        }

        let mut outcome = BatchOutcome::default();
        let chunk_count = results.len().div_ceil(self.batch_size);

        for (index, chunk) in results.chunks(self.batch_size).enumerate() {
            self.limiter.throttle().await;
            tracing::debug!(
                "Writing chunk {}/{} ({} results)",
                index + 1,
                chunk_count,
                chunk.len()
            );

            let writes = chunk.iter().map(|result| async move {
                let update = VerificationUpdate::from_result(result, verified_on);
                (result, self.repository.write_verification(&update).await)
            });

            for (result, write) in join_all(writes).await {
                match write {
                    Ok(()) => {
                        self.metrics.record_write(true);
                        outcome.record_success();
                    }
                    Err(e) => {
                        self.metrics.record_write(false);
                        tracing::warn!(
                            contact = %result.contact_name,
                            contact_id = %result.contact_id,
                            error = %e,
                            "Failed to write verification result"
                        );
                        outcome.record_failure(format!("{}: {}", result.contact_name, e));
                    }
                }
            }
        }

        tracing::info!(
            "Wrote {} results ({} failed) in {} chunks",
            outcome.success_count,
            outcome.error_count,
            chunk_count
        );
        outcome
    }
}
