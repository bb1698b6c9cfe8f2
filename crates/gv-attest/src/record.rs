//! Proof record wire types.

use gv_core::{DataHash, PortfolioId, ProofId, Timestamp};
use gv_portfolio::ValidationSummary;
use serde::{Deserialize, Serialize};

/// Default `generatedBy` for records issued by this process.
pub const GENERATED_BY: &str = "GlassVault Local Agent";

/// Claim text for a portfolio that passed the policy.
pub const CLAIM_PASSED: &str = "No loan > 90 days past due";

/// Claim text for a portfolio that failed the policy.
pub const CLAIM_FAILED: &str = "Validation Failed";

/// The default claim for a validation outcome.
pub fn standard_claim(summary: &ValidationSummary) -> &'static str {
    if summary.passed {
        CLAIM_PASSED
    } else {
        CLAIM_FAILED
    }
}

/// An issued attestation.
///
/// `portfolio_id` keeps its snake_case wire name; every other field is
/// camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    #[serde(rename = "proofId")]
    pub proof_id: ProofId,
    pub portfolio_id: PortfolioId,
    pub claim: String,
    #[serde(rename = "dataHash")]
    pub data_hash: DataHash,
    #[serde(rename = "validationSummary")]
    pub validation_summary: ValidationSummary,
    #[serde(rename = "generatedBy")]
    pub generated_by: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: Timestamp,
}

/// Whether an attestation was registered in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttestationMode {
    /// Registered; retrievable by verification.
    Online,
    /// Minted locally; never retrievable by verification.
    Offline,
}

impl AttestationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for AttestationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an attestation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub mode: AttestationMode,
    pub record: ProofRecord,
}

impl Attestation {
    pub fn is_registered(&self) -> bool {
        self.mode == AttestationMode::Online
    }
}

/// Row of the recent-proofs listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofListing {
    pub proof_id: ProofId,
    pub mode: AttestationMode,
    pub claim: String,
    pub timestamp: Timestamp,
    /// Always `issued` for ledger entries.
    pub status: String,
}

impl From<&ProofRecord> for ProofListing {
    fn from(record: &ProofRecord) -> Self {
        Self {
            proof_id: record.proof_id.clone(),
            mode: AttestationMode::Online,
            claim: record.claim.clone(),
            timestamp: record.generated_at,
            status: "issued".to_string(),
        }
    }
}
