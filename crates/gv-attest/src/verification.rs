//! # Verification Service
//!
//! Recomputes a proof's data hash from the data the verifier holds and
//! compares it with the committed one. The record's own `portfolio_id` is
//! used for the recomputation, so data submitted under another portfolio
//! cannot verify.
//!
//! - [`VerificationService::verify`] looks the record up in the ledger. It is
//!   a pure read.
//! - [`VerificationService::verify_record`] checks a record the caller
//!   already holds, such as a local-only `GV-OFFLINE-*` record. It never
//!   touches the ledger, and so it cannot tell whether the record was ever
//!   registered.

use gv_core::{DataHash, PortfolioId, ProofId, Timestamp};
use gv_portfolio::ValidationSummary;
use serde::{Deserialize, Serialize};

use crate::commitment::{commitment_hash, LoanView};
use crate::error::ServiceError;
use crate::ledger::ProofLedger;
use crate::record::ProofRecord;

/// Outcome of a verification. Three distinct cases, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Recomputed hash equals the stored hash.
    Verified {
        #[serde(rename = "proofId")]
        proof_id: ProofId,
        portfolio_id: PortfolioId,
        claim: String,
        #[serde(rename = "generatedAt")]
        generated_at: Timestamp,
        #[serde(rename = "validationSummary")]
        validation_summary: ValidationSummary,
        #[serde(rename = "dataHash")]
        data_hash: DataHash,
    },
    /// The proof exists but the submitted data hashes differently.
    Mismatch {
        #[serde(rename = "proofId")]
        proof_id: ProofId,
        expected_hash: DataHash,
        computed_hash: DataHash,
    },
    /// No such proof in the ledger.
    NotFound {
        #[serde(rename = "proofId")]
        proof_id: ProofId,
    },
}

impl VerificationOutcome {
    pub fn proof_id(&self) -> &ProofId {
        match self {
            Self::Verified { proof_id, .. }
            | Self::Mismatch { proof_id, .. }
            | Self::NotFound { proof_id } => proof_id,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The wire `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "verified",
            Self::Mismatch { .. } => "mismatch",
            Self::NotFound { .. } => "not_found",
        }
    }
}

/// Verifies submitted data against ledger records.
#[derive(Debug, Clone)]
pub struct VerificationService {
    ledger: ProofLedger,
}

impl VerificationService {
    pub fn new(ledger: ProofLedger) -> Self {
        Self { ledger }
    }

    pub fn verify(
        &self,
        proof_id: &ProofId,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<VerificationOutcome, ServiceError> {
        let Some(record) = self.ledger.get(proof_id) else {
            tracing::info!(proof_id = %proof_id, "verification: proof not found");
            return Ok(VerificationOutcome::NotFound {
                proof_id: proof_id.clone(),
            });
        };

        compare(record, loans, summary)
    }

    /// Check `record` against `loans` and `summary` without consulting the
    /// ledger. The outcome is `verified` or `mismatch`, never `not_found`.
    pub fn verify_record(
        &self,
        record: &ProofRecord,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<VerificationOutcome, ServiceError> {
        compare(record.clone(), loans, summary)
    }
}

fn compare(
    record: ProofRecord,
    loans: &[LoanView],
    summary: &ValidationSummary,
) -> Result<VerificationOutcome, ServiceError> {
    let computed = commitment_hash(&record.portfolio_id, loans, summary)?;
    if computed == record.data_hash {
        tracing::info!(proof_id = %record.proof_id, "verification: hash matches");
        Ok(VerificationOutcome::Verified {
            proof_id: record.proof_id,
            portfolio_id: record.portfolio_id,
            claim: record.claim,
            generated_at: record.generated_at,
            validation_summary: record.validation_summary,
            data_hash: record.data_hash,
        })
    } else {
        tracing::warn!(
            proof_id = %record.proof_id,
            expected = %record.data_hash.short(12),
            computed = %computed.short(12),
            "verification: hash mismatch"
        );
        Ok(VerificationOutcome::Mismatch {
            proof_id: record.proof_id,
            expected_hash: record.data_hash,
            computed_hash: computed,
        })
    }
}
