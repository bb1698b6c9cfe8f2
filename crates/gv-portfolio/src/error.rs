//! # Portfolio Errors
//!
//! Two failure families: a document that cannot be ingested as a portfolio,
//! and loan data that cannot be validated. Neither is ever papered over with
//! a default value.

use gv_core::LoanId;
use thiserror::Error;

use crate::valuation::ValuationBandError;

/// A loan field is malformed; the validation run is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationDataError {
    /// The loan's valuation band could not be parsed.
    #[error("loan {loan_id}: invalid valuation_band {band:?}: {source}")]
    InvalidValuationBand {
        /// The offending loan.
        loan_id: LoanId,
        /// The band as ingested.
        band: String,
        /// Parse failure.
        source: ValuationBandError,
    },

    /// The summed NAV estimate does not fit in a `u64`.
    #[error("NAV estimate overflowed at loan {loan_id}")]
    NavOverflow {
        /// Loan at which the running total overflowed.
        loan_id: LoanId,
    },
}

/// A portfolio document was rejected at ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The document is not valid portfolio JSON.
    #[error("malformed portfolio document: {0}")]
    Json(#[from] serde_json::Error),

    /// The declared `total_loans` disagrees with the loans present.
    #[error("portfolio {portfolio_id} declares {declared} loans but contains {actual}")]
    LoanCountMismatch {
        /// Portfolio being ingested.
        portfolio_id: String,
        /// Declared count.
        declared: usize,
        /// Actual number of loan records.
        actual: usize,
    },

    /// Two loans share an id.
    #[error("portfolio {portfolio_id} contains duplicate loan id {loan_id}")]
    DuplicateLoanId {
        /// Portfolio being ingested.
        portfolio_id: String,
        /// Repeated loan id.
        loan_id: LoanId,
    },

    /// A portfolio with this id is already in the store.
    #[error("portfolio {0} is already loaded")]
    DuplicatePortfolio(String),
}
