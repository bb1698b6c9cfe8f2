//! # gv-attest: Attestation and Verification Core
//!
//! Issues tamper-evident attestations over loan portfolio snapshots and lets
//! a third party re-verify them by recomputing the commitment hash.
//!
//! - **Commitment** (`commitment.rs`): the reduced per-loan view
//!   (`{id, dpd}`) and the canonical data hash over
//!   `(portfolioId, loans, summary)`.
//!
//! - **Record** (`record.rs`): the `ProofRecord` wire type and attestation
//!   result types.
//!
//! - **Ledger** (`ledger.rs`): the insertion-ordered proof store with
//!   collision-free id allocation.
//!
//! - **Health** (`health.rs`): online/offline mode and per-dependency status.
//!   Ledger-touching operations gate on it.
//!
//! - **Attestation** (`attestation.rs`): hash, then register in the ledger when
//!   reachable or mint an unregistered local record when not.
//!
//! - **Verification** (`verification.rs`): look up, recompute, compare.
//!   `verified`, `mismatch` and `not_found` are distinct outcomes.
//!
//! - **Evidence** (`evidence.rs`): proof export with redacted sample rows.
//!
//! - **Service** (`service.rs`): the `GlassVault` facade exposed to the HTTP
//!   and CLI surfaces, with an injectable simulated network latency.
//!
//! ## Security Invariant
//!
//! The issuer and the verifier compute the data hash through the same
//! function, [`commitment::commitment_hash`], which routes through
//! `gv_core::CanonicalBytes`. There is no second hashing path.
//!
//! ## Offline Contract
//!
//! An attestation issued while the ledger is unreachable is returned to the
//! caller only. It carries an `OFFLINE` proof id and is never retrievable by
//! verification, even after the ledger comes back.

pub mod attestation;
pub mod commitment;
pub mod error;
pub mod evidence;
pub mod health;
pub mod ledger;
pub mod record;
pub mod service;
pub mod verification;

pub use attestation::AttestationService;
pub use commitment::{commitment_hash, reduce, LoanView};
pub use error::{HealthError, LedgerError, ServiceError};
pub use evidence::{Evidence, SampleRow};
pub use health::{
    Dependency, DependencyStatus, HealthMonitor, Mode, OutageRequest, ServiceHealth,
};
pub use ledger::ProofLedger;
pub use record::{standard_claim, Attestation, AttestationMode, ProofListing, ProofRecord};
pub use service::{GlassVault, ServiceConfig};
pub use verification::{VerificationOutcome, VerificationService};
