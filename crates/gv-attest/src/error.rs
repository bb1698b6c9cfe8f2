//! # Attestation Errors
//!
//! `ServiceError` is the single error type returned by the core facade.
//! Callers branch on the variant: `Unavailable` selects the local fallback
//! path, `NotFound` is terminal for that one lookup, `ValidationData` aborts
//! the validation run. Verification never reports an unknown proof id as an
//! error; that is the `NotFound` *outcome* of
//! [`crate::verification::VerificationOutcome`].

use gv_core::{CanonicalizationError, IdentifierError, ProofId};
use gv_portfolio::{IngestError, ValidationDataError};
use thiserror::Error;

/// Error returned by core operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The ledger or a remote dependency is unreachable. Recoverable.
    #[error("{operation} unavailable: {reason}")]
    Unavailable {
        /// The operation that was refused.
        operation: &'static str,
        /// Which gate refused it.
        reason: String,
    },

    /// Unknown dataset or proof id.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// `"dataset"` or `"proof"`.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// Malformed loan data aborted a validation run.
    #[error(transparent)]
    ValidationData(#[from] ValidationDataError),

    /// Portfolio ingestion failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The commitment payload could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The ledger refused a write.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// An outage request named an unknown service or status.
    #[error(transparent)]
    Health(#[from] HealthError),
}

impl ServiceError {
    /// Build an `Unavailable` error.
    pub fn unavailable(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            operation,
            reason: reason.into(),
        }
    }

    /// Whether the caller should take its local fallback path.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Error from the proof ledger.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Insert would overwrite an existing proof.
    #[error("proof id {0} is already registered")]
    DuplicateProofId(ProofId),

    /// No free proof id was found within the retry budget.
    #[error("could not allocate a free proof id after {0} attempts")]
    IdSpaceExhausted(usize),

    /// The id generator produced an unusable id.
    #[error(transparent)]
    InvalidProofId(#[from] IdentifierError),
}

/// Error from an outage simulation request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HealthError {
    /// Not `all` or a known dependency name.
    #[error("unknown service {0:?}")]
    UnknownService(String),

    /// Not `ok`, `degraded` or `down`.
    #[error("unknown service status {0:?}")]
    UnknownStatus(String),
}
