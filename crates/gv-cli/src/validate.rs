//! # Validate Subcommand
//!
//! Runs the portfolio-health policy and prints the outcome. Exits `1` when
//! any loan is more than 90 days past due.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use gv_portfolio::{evaluate, PolicyReport};

use crate::source::PortfolioSource;
use crate::{write_json, EXIT_FAILED, EXIT_OK};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: PortfolioSource,

    /// Print the full policy report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write the policy report to this file.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let (_, portfolio) = args.source.load()?;
    let report: PolicyReport = evaluate(portfolio.loans())
        .with_context(|| format!("validation of {} aborted", portfolio.id()))?;
    let summary = &report.summary;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}: {} (loans={} over_90={} nav={})",
            portfolio.id(),
            if summary.passed { "PASSED" } else { "FAILED" },
            summary.total_loans,
            summary.loans_over_90,
            summary.nav_estimate
        );
        for loan in &report.breaching_loans {
            println!("  breach: {loan}");
        }
    }

    if let Some(path) = &args.out {
        write_json(path, &report)?;
    }

    Ok(if summary.passed { EXIT_OK } else { EXIT_FAILED })
}
