//! # Validation Engine
//!
//! Evaluates the fixed portfolio-health policy over an ordered loan sequence.
//!
//! ## Policy
//!
//! - `loansOver90` counts loans with `days_past_due > 90`. A loan at exactly
//!   90 days does not breach.
//! - `passed` holds iff `loansOver90 == 0`.
//! - `navEstimate` is the sum over loans of band midpoint × notional.
//!
//! ## Determinism
//!
//! For a fixed loan sequence every field of the summary except `timestamp`
//! is identical across runs. The timestamp is wall-clock and is part of the
//! attested commitment: a verifier must be handed the exact summary issued
//! at attestation time, never a recomputed one. `validate_at` pins the
//! timestamp for callers that need a fully reproducible summary.

use std::collections::BTreeMap;

use gv_core::{LoanId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::ValidationDataError;
use crate::loan::Loan;
use crate::valuation::{ValuationBand, PER_LOAN_NOTIONAL};

/// Loans strictly past this many days due breach the policy.
pub const DPD_THRESHOLD: u32 = 90;

/// Result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub passed: bool,
    pub total_loans: u64,
    pub loans_over_90: u64,
    /// Whole currency units.
    pub nav_estimate: u64,
    pub timestamp: Timestamp,
}

/// A validation summary plus the per-loan detail behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyReport {
    pub summary: ValidationSummary,
    /// Loans over the threshold, in portfolio order.
    pub breaching_loans: Vec<LoanId>,
    /// How many loans carry each covenant flag.
    pub covenant_flags: BTreeMap<String, u64>,
}

/// Validate `loans`, stamping the summary with the current time.
pub fn validate(loans: &[Loan]) -> Result<ValidationSummary, ValidationDataError> {
    validate_at(loans, Timestamp::now())
}

/// Validate `loans` with an explicit summary timestamp.
pub fn validate_at(
    loans: &[Loan],
    timestamp: Timestamp,
) -> Result<ValidationSummary, ValidationDataError> {
    evaluate_at(loans, timestamp).map(|report| report.summary)
}

/// Evaluate the policy and report breaching loans and covenant flags.
pub fn evaluate(loans: &[Loan]) -> Result<PolicyReport, ValidationDataError> {
    evaluate_at(loans, Timestamp::now())
}

/// Evaluate the policy with an explicit summary timestamp.
pub fn evaluate_at(loans: &[Loan], timestamp: Timestamp) -> Result<PolicyReport, ValidationDataError> {
    let mut nav_estimate: u64 = 0;
    let mut breaching_loans = Vec::new();
    let mut covenant_flags: BTreeMap<String, u64> = BTreeMap::new();

    for loan in loans {
        let band = ValuationBand::parse(&loan.valuation_band).map_err(|source| {
            ValidationDataError::InvalidValuationBand {
                loan_id: loan.loan_id.clone(),
                band: loan.valuation_band.clone(),
                source,
            }
        })?;
        nav_estimate = band
            .nav_contribution(PER_LOAN_NOTIONAL)
            .and_then(|contribution| nav_estimate.checked_add(contribution))
            .ok_or_else(|| ValidationDataError::NavOverflow {
                loan_id: loan.loan_id.clone(),
            })?;

        if loan.days_past_due > DPD_THRESHOLD {
            breaching_loans.push(loan.loan_id.clone());
        }
        for flag in &loan.covenant_flags {
            *covenant_flags.entry(flag.clone()).or_default() += 1;
        }
    }

    let loans_over_90 = breaching_loans.len() as u64;
    let summary = ValidationSummary {
        passed: loans_over_90 == 0,
        total_loans: loans.len() as u64,
        loans_over_90,
        nav_estimate,
        timestamp,
    };

    tracing::debug!(
        total_loans = summary.total_loans,
        loans_over_90 = summary.loans_over_90,
        nav_estimate = summary.nav_estimate,
        passed = summary.passed,
        "validation run complete"
    );

    Ok(PolicyReport {
        summary,
        breaching_loans,
        covenant_flags,
    })
}
