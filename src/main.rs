//! Contact Verifier - Main entry point
//!
//! Runs a verification pass from the command line, or serves the same
//! operations as MCP tools over stdio.

use anyhow::Result;
use clap::Parser;
use contact_verifier::bootstrap::AppContext;
use contact_verifier::cli::{Cli, Commands};
use contact_verifier::services::{ContactVerifier, VerificationRun};
use contact_verifier::{Config, VerifierMcpServer};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for a run interrupted by Ctrl-C.
const INTERRUPTED_EXIT_CODE: u8 = 130;

fn init_logging(config: &Config) {
    // stderr only; stdout carries the MCP protocol and the CLI summary
    let default_level = if config.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn print_run(run: &VerificationRun, json: bool) -> Result<()> {
    let report = &run.report;
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let summary = &report.summary;
    println!("Verification run ({})", report.mode);
    println!("  Processed:     {}", summary.total_processed);
    println!("  Confirmed:     {}", summary.counts.confirmed);
    println!("  Outdated:      {}", summary.counts.outdated);
    println!("  Unknown:       {}", summary.counts.unknown);
    println!("  Needs review:  {}", summary.counts.needs_review);
    println!("  Errors:        {}", summary.counts.error);
    if let Some(average) = summary.average_confidence {
        println!("  Avg confidence: {:.0}%", average * 100.0);
    }
    if report.dry_run {
        println!("  Dry run: no changes written");
    } else {
        println!(
            "  Written: {} ok, {} failed",
            report.persistence.success_count, report.persistence.error_count
        );
        for failure in &report.persistence.errors {
            println!("    - {}", failure);
        }
    }
    for insight in &summary.insights {
        println!("  * {}", insight);
    }
    if let Some(ref path) = run.report_path {
        println!("Report: {}", path.display());
    }
    Ok(())
}

async fn run_command(cli: &Cli, context: Arc<AppContext>) -> Result<()> {
    let verifier: Arc<dyn ContactVerifier> = match cli.command {
        Commands::Verify(_) => context.search_verifier.clone(),
        Commands::Assess(_) => context.quality_verifier.clone(),
        Commands::Serve => {
            info!("Starting MCP server with stdio transport");
            let server = VerifierMcpServer::new(context.clone());
            return contact_verifier::server::run_server(server).await;
        }
    };

    let options = context.default_run_options();
    let run = context.service.run(verifier.as_ref(), &options).await?;
    print_run(&run, cli.json)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    info!("Configuration loaded for CRM instance {}", config.crm_instance_url);

    let context = Arc::new(AppContext::build(&config));

    let outcome = tokio::select! {
        result = run_command(&cli, context.clone()) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => {
            context.shutdown().await;
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            error!("{:#}", e);
            context.shutdown().await;
            ExitCode::FAILURE
        }
        None => {
            error!("Interrupted; completed writes remain committed");
            ExitCode::from(INTERRUPTED_EXIT_CODE)
        }
    }
}
