//! # gv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gv_cli::attest::{run_attest, AttestArgs};
use gv_cli::check::{run_check, CheckArgs};
use gv_cli::datasets::run_datasets;
use gv_cli::hash::{run_hash, HashArgs};
use gv_cli::validate::{run_validate, ValidateArgs};
use gv_cli::EXIT_ERROR;

/// GlassVault CLI
///
/// Proof-of-portfolio-health toolkit: validate loan portfolios against the
/// >90 days-past-due policy, compute commitment hashes, and issue and verify
/// attestations.
#[derive(Parser, Debug)]
#[command(name = "gv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Simulated network latency per ledger operation, in milliseconds.
    #[arg(long, default_value_t = 0, global = true)]
    latency_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the bundled reference datasets.
    Datasets,

    /// Validate a portfolio against the >90 days-past-due policy.
    Validate(ValidateArgs),

    /// Compute the commitment hash for a portfolio snapshot.
    Hash(HashArgs),

    /// Validate, attest and verify a portfolio.
    Attest(AttestArgs),

    /// Check a proof record file against portfolio data without the ledger.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let latency = Duration::from_millis(cli.latency_ms);

    let result = match cli.command {
        Commands::Datasets => run_datasets(),
        Commands::Validate(args) => run_validate(&args),
        Commands::Hash(args) => run_hash(&args),
        Commands::Attest(args) => run_attest(&args, latency),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
