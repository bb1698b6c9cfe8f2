//! # Hash Subcommand
//!
//! Computes the commitment hash for a portfolio snapshot. The summary is
//! part of the hashed payload, so reproducing an issued hash needs the exact
//! summary issued with it (`--summary`). Without one a fresh validation run
//! supplies the summary, and the hash will differ from any earlier run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use gv_attest::{commitment_hash, reduce};
use gv_core::DataHash;
use gv_portfolio::{validate, ValidationSummary};

use crate::source::PortfolioSource;
use crate::EXIT_OK;

#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub source: PortfolioSource,

    /// JSON file holding the ValidationSummary to hash against.
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

pub fn run_hash(args: &HashArgs) -> Result<u8> {
    let (hash, summary) = compute_hash(args)?;
    if args.summary.is_none() {
        println!("summary: {}", serde_json::to_string(&summary)?);
    }
    println!("{hash}");
    Ok(EXIT_OK)
}

/// The commitment hash and the summary it was computed over.
pub fn compute_hash(args: &HashArgs) -> Result<(DataHash, ValidationSummary)> {
    let (_, portfolio) = args.source.load()?;

    let summary: ValidationSummary = match &args.summary {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse summary: {}", path.display()))?
        }
        None => validate(portfolio.loans())?,
    };

    let hash = commitment_hash(portfolio.id(), &reduce(portfolio.loans()), &summary)?;
    Ok((hash, summary))
}
