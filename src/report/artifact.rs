//! Timestamped JSON audit trail for each run.

use crate::error::ReportResult;
use crate::models::{BatchOutcome, VerificationResult};
use crate::report::summary::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which verifier produced a run's results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    Search,
    DataQuality,
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => f.write_str("search"),
            Self::DataQuality => f.write_str("data_quality"),
        }
    }
}

/// The persisted report for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationReport {
    pub generated_at: DateTime<Utc>,
    pub mode: VerificationMode,
    pub dry_run: bool,
    pub summary: RunSummary,
    pub persistence: BatchOutcome,
    pub results: Vec<VerificationResult>,
}

/// `verification-report-20261016T120000123Z.json`
pub fn report_file_name(generated_at: DateTime<Utc>) -> String {
    format!(
        "verification-report-{}.json",
        generated_at.format("%Y%m%dT%H%M%S%3fZ")
    )
}

fn numbered_file_name(generated_at: DateTime<Utc>, attempt: u32) -> String {
    if attempt == 0 {
        return report_file_name(generated_at);
    }
    format!(
        "verification-report-{}-{}.json",
        generated_at.format("%Y%m%dT%H%M%S%3fZ"),
        attempt
    )
}

impl VerificationReport {
    /// Write the report as pretty JSON under `dir`, creating it if needed.
    ///
    /// An existing artifact is never overwritten; a colliding name gets a
    /// numeric suffix.
    pub fn write_to(&self, dir: &Path) -> ReportResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;

        let mut attempt = 0;
        loop {
            let path = dir.join(numbered_file_name(self.generated_at, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    tracing::info!("Report written to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!("Report {} exists, trying next name", path.display());
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
