//! # Attest Subcommand
//!
//! Validates a portfolio, attests the result and immediately verifies the
//! issued proof against the same data, all in one process.
//!
//! With `--offline` the ledger is unreachable from the start: the proof is
//! minted locally, printed, and cannot be verified.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use gv_attest::{reduce, standard_claim, GlassVault, ServiceConfig};

use crate::source::PortfolioSource;
use crate::{write_json, EXIT_FAILED, EXIT_OK};

#[derive(Args, Debug)]
pub struct AttestArgs {
    #[command(flatten)]
    pub source: PortfolioSource,

    /// Claim text. Defaults to the standard claim for the outcome.
    #[arg(long)]
    pub claim: Option<String>,

    /// Simulate an unreachable ledger.
    #[arg(long)]
    pub offline: bool,

    /// Write the evidence export (or the local record when offline) here.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run_attest(args: &AttestArgs, latency: Duration) -> Result<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(attest(args, latency))
}

async fn attest(args: &AttestArgs, latency: Duration) -> Result<u8> {
    let (store, portfolio) = args.source.load()?;
    let vault = GlassVault::with_store(
        store,
        ServiceConfig {
            latency,
            start_offline: args.offline,
            ..ServiceConfig::default()
        },
    );

    let summary = vault.run_validation(&portfolio)?;
    let claim = args
        .claim
        .clone()
        .unwrap_or_else(|| standard_claim(&summary).to_string());
    let loans = reduce(portfolio.loans());

    let attestation = vault.attest(portfolio.id(), &claim, &loans, &summary).await?;
    let record = &attestation.record;
    println!("{}", serde_json::to_string_pretty(record)?);
    println!("mode: {}", attestation.mode);

    if !attestation.is_registered() {
        println!("local-only proof: not registered in the ledger and not verifiable");
        if let Some(path) = &args.out {
            write_json(path, record)?;
        }
        return Ok(if summary.passed { EXIT_OK } else { EXIT_FAILED });
    }

    let outcome = vault.verify(&record.proof_id, &loans, &summary).await?;
    println!("verification: {}", outcome.status());

    if let Some(path) = &args.out {
        let evidence = vault.get_evidence(&record.proof_id).await?;
        write_json(path, &evidence)?;
    }

    if !outcome.is_verified() || !summary.passed {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_OK)
}
