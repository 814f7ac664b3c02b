//! Verification run orchestration.
//!
//! A run checks CRM connectivity, fetches stale contacts, verifies them one at
//! a time, persists the results in batches, and summarizes them into a report.

use crate::client::StaleContactQuery;
use crate::error::VerifyResult;
use crate::metrics::Metrics;
use crate::models::{Contact, VerificationResult};
use crate::persistence::BatchWriter;
use crate::report::{ReportAggregator, VerificationReport};
use crate::repositories::ContactRepository;
use crate::services::verifier::ContactVerifier;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-run selection and write-back options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub limit: usize,
    pub months: u32,
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            limit: 25,
            months: 6,
            dry_run: false,
        }
    }
}

/// Completed run: the in-memory report and where it was written, if anywhere.
#[derive(Debug, Clone)]
pub struct VerificationRun {
    pub report: VerificationReport,
    pub report_path: Option<PathBuf>,
}

/// Orchestrates verification runs against the CRM.
pub struct VerificationService {
    repository: Arc<dyn ContactRepository>,
    writer: BatchWriter,
    aggregator: ReportAggregator,
    report_dir: Option<PathBuf>,
    metrics: Metrics,
}

impl VerificationService {
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        writer: BatchWriter,
        report_dir: Option<PathBuf>,
        metrics: Metrics,
    ) -> Self {
        Self {
            repository,
            writer,
            aggregator: ReportAggregator::new(),
            report_dir,
            metrics,
        }
    }

    /// Run a full verification pass.
    ///
    /// # Errors
    /// Only CRM connectivity and query failures abort the run. Per-contact
    /// and per-write failures are recorded in the report instead.
    pub async fn run(
        &self,
        verifier: &dyn ContactVerifier,
        options: &RunOptions,
    ) -> VerifyResult<VerificationRun> {
        let mode = verifier.mode();
        tracing::info!(
            mode = %mode,
            limit = options.limit,
            months = options.months,
            dry_run = options.dry_run,
            "Starting verification run"
        );

        self.repository.check_connection().await.map_err(|e| {
            tracing::error!(error = %e, "CRM connectivity check failed");
            e
        })?;

        let query = StaleContactQuery {
            limit: options.limit,
            months: options.months,
        };
        let contacts = self.repository.find_unverified(&query).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch contacts for verification");
            e
        })?;
        tracing::info!("Found {} contacts to verify", contacts.len());

        let results = self.verify_all(verifier, &contacts).await;
        let persistence = self.writer.persist(&results, options.dry_run).await;
        let summary = self.aggregator.summarize(&results);

        let report = VerificationReport {
            generated_at: Utc::now(),
            mode,
            dry_run: options.dry_run,
            summary,
            persistence,
            results,
        };

        let report_path = match self.report_dir {
            Some(ref dir) => match report.write_to(dir) {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to write verification report");
                    None
                }
            },
            None => None,
        };

        tracing::info!(
            processed = report.summary.total_processed,
            confirmed = report.summary.counts.confirmed,
            written = report.persistence.success_count,
            write_errors = report.persistence.error_count,
            "Verification run complete"
        );
        self.metrics.log_summary();

        Ok(VerificationRun {
            report,
            report_path,
        })
    }

    /// Verify contacts sequentially, producing exactly one result per contact.
    pub async fn verify_all(
        &self,
        verifier: &dyn ContactVerifier,
        contacts: &[Contact],
    ) -> Vec<VerificationResult> {
        let mut results = Vec::with_capacity(contacts.len());

        for (index, contact) in contacts.iter().enumerate() {
            if index > 0 {
                let delay = verifier.contact_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            let result = match verifier.verify(contact).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(
                        contact = %contact.name,
                        contact_id = %contact.id,
                        error = %e,
                        "Contact verification failed"
                    );
                    VerificationResult::failed(contact, &e)
                }
            };

            tracing::info!(
                "[{}/{}] {}: {}",
                index + 1,
                contacts.len(),
                contact.name,
                result.status
            );
            results.push(result);
        }

        results
    }
}
