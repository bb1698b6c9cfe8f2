//! # Attestation Service
//!
//! Binds a claim to a portfolio snapshot. The data hash is always computed
//! locally first; the health monitor then decides where the record goes.
//!
//! - Ledger reachable: a fresh `GV-XXXXXX` id is allocated and the record is
//!   inserted under one ledger lock. The result is `online`.
//! - Ledger unreachable (offline, or its status is anything but `ok`): a
//!   `GV-OFFLINE-NNNN` record is minted and handed back to the caller only.
//!   The result is `offline`. It is never written to the ledger, so ledger
//!   verification reports it as not found, even once the ledger is back.
//!   Its holder can still check it with
//!   [`VerificationService::verify_record`](crate::VerificationService::verify_record).

use gv_core::identity::OFFLINE_MARKER;
use gv_core::{PortfolioId, ProofId, Timestamp};
use gv_portfolio::ValidationSummary;
use rand::Rng;

use crate::commitment::{commitment_hash, LoanView};
use crate::error::{LedgerError, ServiceError};
use crate::health::HealthMonitor;
use crate::ledger::{ProofLedger, PROOF_ID_PREFIX};
use crate::record::{Attestation, AttestationMode, ProofRecord, GENERATED_BY};

/// Issues proof records.
#[derive(Debug, Clone)]
pub struct AttestationService {
    ledger: ProofLedger,
    health: HealthMonitor,
    generated_by: String,
}

fn offline_proof_id() -> Result<ProofId, ServiceError> {
    let n: u16 = rand::thread_rng().gen_range(0..10_000);
    let id = ProofId::new(format!("{PROOF_ID_PREFIX}-{OFFLINE_MARKER}-{n:04}"))
        .map_err(LedgerError::from)?;
    Ok(id)
}

impl AttestationService {
    pub fn new(ledger: ProofLedger, health: HealthMonitor) -> Self {
        Self {
            ledger,
            health,
            generated_by: GENERATED_BY.to_string(),
        }
    }

    /// Override the `generatedBy` stamped on new records.
    pub fn with_generated_by(mut self, generated_by: impl Into<String>) -> Self {
        self.generated_by = generated_by.into();
        self
    }

    /// Attest `claim` over the snapshot `(portfolio_id, loans, summary)`.
    ///
    /// Unavailability of the ledger is not an error here: it selects the
    /// offline path. Only canonicalization and ledger write failures surface.
    pub fn attest(
        &self,
        portfolio_id: &PortfolioId,
        claim: &str,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<Attestation, ServiceError> {
        let data_hash = commitment_hash(portfolio_id, loans, summary)?;
        let build = |proof_id: ProofId| ProofRecord {
            proof_id,
            portfolio_id: portfolio_id.clone(),
            claim: claim.to_string(),
            data_hash: data_hash.clone(),
            validation_summary: summary.clone(),
            generated_by: self.generated_by.clone(),
            generated_at: Timestamp::now(),
        };

        match self.health.ensure_ledger("attest") {
            Ok(()) => {
                let record = self.ledger.issue(build)?;
                tracing::info!(
                    proof_id = %record.proof_id,
                    portfolio_id = %portfolio_id,
                    data_hash = %record.data_hash.short(12),
                    "attestation registered"
                );
                Ok(Attestation {
                    mode: AttestationMode::Online,
                    record,
                })
            }
            Err(ServiceError::Unavailable { reason, .. }) => {
                let record = build(offline_proof_id()?);
                self.health.record_unregistered_proof();
                tracing::warn!(
                    proof_id = %record.proof_id,
                    portfolio_id = %portfolio_id,
                    reason = %reason,
                    "ledger unavailable; issued local-only attestation"
                );
                Ok(Attestation {
                    mode: AttestationMode::Offline,
                    record,
                })
            }
            Err(other) => Err(other),
        }
    }
}
