//! Command-line interface.
//!
//! Flags override values loaded from the environment for a single invocation.

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "contact-verifier",
    version,
    about = "Verify CRM contact freshness against public search results"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Print the run report as JSON on stdout")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify stale contacts through public search engines
    Verify(RunArgs),
    /// Assess stale contacts from their own fields without searching
    Assess(RunArgs),
    /// Serve the verification tools over MCP on stdio
    Serve,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(long, help = "Maximum number of contacts to verify")]
    pub limit: Option<usize>,
    #[arg(long, help = "Skip contacts verified within this many months")]
    pub months: Option<u32>,
    #[arg(long, help = "Preview results without writing to the CRM")]
    pub dry_run: bool,
    #[arg(long, help = "Skip email format and MX checks")]
    pub no_email_validation: bool,
    #[arg(long, help = "Minimum delay between outbound requests in milliseconds")]
    pub min_delay_ms: Option<u64>,
    #[arg(long, help = "Number of CRM writes per batch")]
    pub batch_size: Option<usize>,
    #[arg(long, help = "Directory for report artifacts")]
    pub report_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply global and per-command flags on top of `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if self.verbose {
            config.verbose = true;
        }
        match self.command {
            Commands::Verify(ref args) | Commands::Assess(ref args) => args.apply_to(config),
            Commands::Serve => {}
        }
    }
}

impl RunArgs {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(limit) = self.limit {
            config.contact_limit = limit;
        }
        if let Some(months) = self.months {
            config.staleness_months = months;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.no_email_validation {
            config.validate_email = false;
        }
        if let Some(min_delay_ms) = self.min_delay_ms {
            config.min_request_interval_ms = min_delay_ms;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(ref report_dir) = self.report_dir {
            config.report_dir = report_dir.clone();
        }
    }
}
