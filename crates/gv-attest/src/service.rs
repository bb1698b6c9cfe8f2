//! # GlassVault Facade
//!
//! The operation surface shared by the HTTP API and the CLI. One
//! `GlassVault` owns the process's portfolio store, proof ledger and health
//! monitor; clones share all three.
//!
//! Every remote-style operation first awaits the configured simulated
//! network latency (zero by default) and then runs synchronously. No lock is
//! held across that await.
//!
//! | Operation | Offline | Ledger degraded or down | Unknown id |
//! |---|---|---|---|
//! | `list_datasets` | `Unavailable` | available | n/a |
//! | `get_dataset` | `Unavailable` | available | `NotFound` |
//! | `get_dataset_local` | available | available | `None` |
//! | `attest` | local-only record | local-only record | n/a |
//! | `verify` | `Unavailable` | available | `not_found` outcome |
//! | `verify_record` | available | available | n/a |
//! | `get_evidence` | `Unavailable` | available | `NotFound` |
//! | `list_recent_proofs` | `Unavailable` | available | n/a |
//! | `get_status`, `simulate_outage` | available | available | n/a |

use std::sync::Arc;
use std::time::Duration;

use gv_core::{PortfolioId, ProofId};
use gv_portfolio::{
    evaluate, DatasetSummary, PolicyReport, Portfolio, PortfolioStore, ValidationSummary,
};

use crate::attestation::AttestationService;
use crate::commitment::LoanView;
use crate::error::ServiceError;
use crate::evidence::Evidence;
use crate::health::{HealthMonitor, OutageRequest, ServiceHealth};
use crate::ledger::ProofLedger;
use crate::record::{Attestation, ProofListing, ProofRecord, GENERATED_BY};
use crate::verification::{VerificationOutcome, VerificationService};

/// Listing size when the caller gives none.
pub const DEFAULT_PROOF_LIMIT: usize = 5;

/// Construction-time settings for [`GlassVault`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Simulated network latency awaited by each remote-style operation.
    pub latency: Duration,
    /// `generatedBy` stamped on issued records.
    pub generated_by: String,
    /// Start as if `{all, down}` had been applied.
    pub start_offline: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            generated_by: GENERATED_BY.to_string(),
            start_offline: false,
        }
    }
}

/// The attestation and verification facade.
#[derive(Debug, Clone)]
pub struct GlassVault {
    store: Arc<PortfolioStore>,
    ledger: ProofLedger,
    health: HealthMonitor,
    attestation: AttestationService,
    verification: VerificationService,
    config: ServiceConfig,
}

impl GlassVault {
    /// A facade over the bundled demo datasets.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        Ok(Self::with_store(PortfolioStore::seeded()?, config))
    }

    /// A facade over an explicit store, with an empty ledger.
    pub fn with_store(store: PortfolioStore, config: ServiceConfig) -> Self {
        let ledger = ProofLedger::new();
        let health = if config.start_offline {
            HealthMonitor::offline()
        } else {
            HealthMonitor::new()
        };
        let attestation = AttestationService::new(ledger.clone(), health.clone())
            .with_generated_by(config.generated_by.clone());
        let verification = VerificationService::new(ledger.clone());
        Self {
            store: Arc::new(store),
            ledger,
            health,
            attestation,
            verification,
            config,
        }
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    pub fn ledger(&self) -> &ProofLedger {
        &self.ledger
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn network(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    // -- Datasets -------------------------------------------------------------

    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>, ServiceError> {
        self.network().await;
        self.health.ensure_online("list datasets")?;
        Ok(self.store.list())
    }

    pub async fn get_dataset(&self, id: &str) -> Result<Arc<Portfolio>, ServiceError> {
        self.network().await;
        self.health.ensure_online("get dataset")?;
        self.store.get_str(id).ok_or_else(|| ServiceError::NotFound {
            kind: "dataset",
            id: id.to_string(),
        })
    }

    /// Direct store access for the offline path. Never gated.
    pub fn get_dataset_local(&self, id: &str) -> Option<Arc<Portfolio>> {
        self.store.get_str(id)
    }

    // -- Validation -----------------------------------------------------------

    /// Run the policy locally. Available in every mode.
    pub fn run_validation(&self, portfolio: &Portfolio) -> Result<ValidationSummary, ServiceError> {
        Ok(self.evaluate(portfolio)?.summary)
    }

    /// Like [`run_validation`](Self::run_validation), with breach detail.
    pub fn evaluate(&self, portfolio: &Portfolio) -> Result<PolicyReport, ServiceError> {
        let report = evaluate(portfolio.loans())?;
        self.health.record_local_run();
        tracing::info!(
            portfolio_id = %portfolio.id(),
            passed = report.summary.passed,
            loans_over_90 = report.summary.loans_over_90,
            "validation run"
        );
        Ok(report)
    }

    // -- Proofs ---------------------------------------------------------------

    pub async fn attest(
        &self,
        portfolio_id: &PortfolioId,
        claim: &str,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<Attestation, ServiceError> {
        self.network().await;
        self.attestation.attest(portfolio_id, claim, loans, summary)
    }

    pub async fn verify(
        &self,
        proof_id: &ProofId,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<VerificationOutcome, ServiceError> {
        self.network().await;
        self.health.ensure_online("verify")?;
        self.verification.verify(proof_id, loans, summary)
    }

    /// Integrity check of a record the caller holds. Local: no latency, no
    /// gate, no ledger lookup.
    pub fn verify_record(
        &self,
        record: &ProofRecord,
        loans: &[LoanView],
        summary: &ValidationSummary,
    ) -> Result<VerificationOutcome, ServiceError> {
        self.verification.verify_record(record, loans, summary)
    }

    pub async fn get_evidence(&self, proof_id: &ProofId) -> Result<Evidence, ServiceError> {
        self.network().await;
        self.health.ensure_online("get evidence")?;
        let record = self.ledger.get(proof_id).ok_or_else(|| ServiceError::NotFound {
            kind: "proof",
            id: proof_id.to_string(),
        })?;
        let portfolio = self.store.get(&record.portfolio_id);
        Ok(Evidence::new(record, portfolio.as_deref()))
    }

    /// Most recent ledger entries, newest first.
    pub async fn list_recent_proofs(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ProofListing>, ServiceError> {
        self.network().await;
        self.health.ensure_online("list proofs")?;
        Ok(self
            .ledger
            .list_recent(limit.unwrap_or(DEFAULT_PROOF_LIMIT))
            .iter()
            .map(ProofListing::from)
            .collect())
    }

    // -- Health ---------------------------------------------------------------

    pub async fn get_status(&self) -> ServiceHealth {
        self.network().await;
        let latency_ms = u64::try_from(self.config.latency.as_millis()).unwrap_or(u64::MAX);
        self.health.record_api_latency(latency_ms);
        self.health.snapshot()
    }

    pub async fn simulate_outage(
        &self,
        request: &OutageRequest,
    ) -> Result<ServiceHealth, ServiceError> {
        self.network().await;
        Ok(self.health.simulate_outage(request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::reduce;
    use crate::health::Mode;

    fn vault() -> GlassVault {
        GlassVault::new(ServiceConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn lists_seeded_datasets() {
        let gv = vault();
        let list = gv.list_datasets().await.unwrap();
        let ids: Vec<&str> = list.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["healthy-1", "distressed-1"]);
    }

    #[tokio::test]
    async fn offline_gates_remote_reads_but_not_local() {
        let gv = GlassVault::new(ServiceConfig {
            start_offline: true,
            ..ServiceConfig::default()
        })
        .unwrap();
        assert!(gv.list_datasets().await.unwrap_err().is_unavailable());
        assert!(gv.get_dataset("healthy-1").await.unwrap_err().is_unavailable());
        assert!(gv.list_recent_proofs(None).await.unwrap_err().is_unavailable());
        assert!(gv.get_dataset_local("healthy-1").is_some());
        assert_eq!(gv.get_status().await.mode, Mode::Offline);
    }

    #[tokio::test]
    async fn unknown_dataset_is_not_found() {
        let err = vault().get_dataset("nope-9").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: "dataset", .. }));
    }

    #[tokio::test]
    async fn evidence_for_unknown_proof_is_not_found() {
        let err = vault()
            .get_evidence(&ProofId::new("GV-000000").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: "proof", .. }));
    }

    #[tokio::test]
    async fn attest_lists_and_exports_evidence() {
        let gv = vault();
        let portfolio = gv.get_dataset("healthy-1").await.unwrap();
        let summary = gv.run_validation(&portfolio).unwrap();
        let att = gv
            .attest(portfolio.id(), "No loan > 90 days past due", &reduce(portfolio.loans()), &summary)
            .await
            .unwrap();

        let listing = gv.list_recent_proofs(None).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].proof_id, att.record.proof_id);
        assert_eq!(listing[0].status, "issued");

        let evidence = gv.get_evidence(&att.record.proof_id).await.unwrap();
        assert_eq!(evidence.data_hash, att.record.data_hash);
        assert_eq!(evidence.sample_rows.len(), 3);
    }

    #[tokio::test]
    async fn list_recent_defaults_to_five() {
        let gv = vault();
        let portfolio = gv.get_dataset_local("healthy-1").unwrap();
        let summary = gv.run_validation(&portfolio).unwrap();
        let loans = reduce(portfolio.loans());
        for _ in 0..7 {
            gv.attest(portfolio.id(), "claim", &loans, &summary).await.unwrap();
        }
        assert_eq!(gv.list_recent_proofs(None).await.unwrap().len(), 5);
        assert_eq!(gv.list_recent_proofs(Some(10)).await.unwrap().len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_awaited() {
        let gv = GlassVault::new(ServiceConfig {
            latency: Duration::from_millis(300),
            ..ServiceConfig::default()
        })
        .unwrap();
        let start = tokio::time::Instant::now();
        gv.list_datasets().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(gv.get_status().await.services.api.latency_ms, Some(300));
    }
}
