//! Run summaries and the persisted report artifact.

pub mod artifact;
pub mod summary;

pub use artifact::{report_file_name, VerificationMode, VerificationReport};
pub use summary::{ReportAggregator, RunSummary, StatusCounts};
