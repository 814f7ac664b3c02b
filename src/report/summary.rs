//! Aggregation of verification results into counts, confidence statistics
//! and insights.

use crate::models::{VerificationResult, VerificationStatus};
use serde::{Deserialize, Serialize};

/// Average confidence below this produces an enrichment insight.
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Confirmed share at or above this produces a "largely current" insight.
const HEALTHY_CONFIRMED_RATIO: f64 = 0.8;

/// Result counts partitioned by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub confirmed: usize,
    pub outdated: usize,
    pub unknown: usize,
    pub needs_review: usize,
    pub error: usize,
}

impl StatusCounts {
    fn record(&mut self, status: VerificationStatus) {
        match status {
            VerificationStatus::Confirmed => self.confirmed += 1,
            VerificationStatus::Outdated => self.outdated += 1,
            VerificationStatus::Unknown => self.unknown += 1,
            VerificationStatus::NeedsReview => self.needs_review += 1,
            VerificationStatus::Error => self.error += 1,
        }
    }

    pub fn get(&self, status: VerificationStatus) -> usize {
        match status {
            VerificationStatus::Confirmed => self.confirmed,
            VerificationStatus::Outdated => self.outdated,
            VerificationStatus::Unknown => self.unknown,
            VerificationStatus::NeedsReview => self.needs_review,
            VerificationStatus::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.confirmed + self.outdated + self.unknown + self.needs_review + self.error
    }
}

/// Summary of one verification run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub counts: StatusCounts,
    pub total_processed: usize,
    /// Mean over results that carry a confidence
    pub average_confidence: Option<f64>,
    pub min_confidence: Option<f64>,
    pub max_confidence: Option<f64>,
    pub insights: Vec<String>,
}

/// Builds a [`RunSummary`] from results.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportAggregator;

impl ReportAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, results: &[VerificationResult]) -> RunSummary {
        let mut counts = StatusCounts::default();
        for result in results {
            counts.record(result.status);
        }

        let confidences: Vec<f64> = results.iter().filter_map(|r| r.confidence).collect();
        let average_confidence = if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        };
        let min_confidence = confidences.iter().copied().reduce(f64::min);
        let max_confidence = confidences.iter().copied().reduce(f64::max);

        let insights = insights(&counts, results.len(), average_confidence);

        RunSummary {
            counts,
            total_processed: results.len(),
            average_confidence,
            min_confidence,
            max_confidence,
            insights,
        }
    }
}

fn percent(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

fn insights(counts: &StatusCounts, total: usize, average_confidence: Option<f64>) -> Vec<String> {
    let mut insights = Vec::new();

    if counts.needs_review > 0 {
        insights.push(format!(
            "{} contact(s) need manual review",
            counts.needs_review
        ));
    }
    if counts.outdated > 0 {
        insights.push(format!(
            "{} contact(s) may have changed companies or roles",
            counts.outdated
        ));
    }
    if counts.unknown > 0 {
        insights.push(format!(
            "{} contact(s) could not be confirmed from public sources",
            counts.unknown
        ));
    }
    if counts.error > 0 {
        insights.push(format!(
            "{} contact(s) failed verification; see notes for details",
            counts.error
        ));
    }
    if let Some(average) = average_confidence {
        if average < LOW_CONFIDENCE_THRESHOLD {
            insights.push(format!(
                "Average confidence is {}%; consider enriching contact data",
                percent(average)
            ));
        }
    }
    if total > 0 {
        let ratio = counts.confirmed as f64 / total as f64;
        if ratio >= HEALTHY_CONFIRMED_RATIO {
            insights.push(format!(
                "{}% of contacts confirmed; data is largely current",
                percent(ratio)
            ));
        }
    }

    insights
}
