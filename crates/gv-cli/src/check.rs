//! # Check Subcommand
//!
//! Local integrity check of a proof record file against portfolio data. No
//! ledger is consulted, so local-only `GV-OFFLINE-*` records can be checked
//! too. The record's embedded summary is used unless `--summary` overrides
//! it. Exits `1` on a hash mismatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use gv_attest::{reduce, GlassVault, ProofRecord, ServiceConfig, VerificationOutcome};
use gv_portfolio::ValidationSummary;

use crate::source::PortfolioSource;
use crate::{EXIT_FAILED, EXIT_OK};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: PortfolioSource,

    /// Proof record JSON, as printed or written by `gv attest --offline`.
    #[arg(long, value_name = "FILE")]
    pub record: PathBuf,

    /// ValidationSummary JSON to check instead of the record's own copy.
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what}: {}", path.display()))
}

pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let outcome = check(args)?;
    println!("{}: {}", outcome.proof_id(), outcome.status());
    if let VerificationOutcome::Mismatch {
        expected_hash,
        computed_hash,
        ..
    } = &outcome
    {
        println!("  expected: {expected_hash}");
        println!("  computed: {computed_hash}");
    }
    Ok(if outcome.is_verified() { EXIT_OK } else { EXIT_FAILED })
}

/// Recompute the record's hash from the selected portfolio.
pub fn check(args: &CheckArgs) -> Result<VerificationOutcome> {
    let record: ProofRecord = read_json(&args.record, "proof record")?;
    let summary: ValidationSummary = match &args.summary {
        Some(path) => read_json(path, "summary")?,
        None => record.validation_summary.clone(),
    };

    let (store, portfolio) = args.source.load()?;
    if portfolio.id() != &record.portfolio_id {
        tracing::warn!(
            record = %record.portfolio_id,
            data = %portfolio.id(),
            "portfolio ids differ; hashing under the record's id"
        );
    }

    let vault = GlassVault::with_store(store, ServiceConfig::default());
    let outcome = vault.verify_record(&record, &reduce(portfolio.loans()), &summary)?;
    Ok(outcome)
}
