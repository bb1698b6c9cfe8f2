//! # Portfolio Commitment
//!
//! The data hash bound into every proof record:
//!
//! ```text
//! dataHash = hex(SHA256(JCS({
//!     "portfolioId": <portfolio id>,
//!     "loans":       [{"id": <loan_id>, "dpd": <days_past_due>}, ...],
//!     "summary":     <ValidationSummary>
//! })))
//! ```
//!
//! Only loan id and days past due enter the hash. Borrower tokens, payment
//! notes and valuation bands stay out of the hash domain. Loan order is
//! significant. The summary, timestamp included, is hashed verbatim, so a
//! verifier must supply the summary issued at attestation time.

use gv_core::{sha256_digest, CanonicalBytes, CanonicalizationError, DataHash, LoanId, PortfolioId};
use gv_portfolio::{Loan, ValidationSummary};
use serde::{Deserialize, Serialize};

/// The reduced per-loan view that enters the commitment.
///
/// Deserializes from either the reduced form (`{"id", "dpd"}`) or a full loan
/// record (`{"loan_id", "days_past_due", ...}`); other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanView {
    #[serde(alias = "loan_id")]
    pub id: LoanId,
    #[serde(alias = "days_past_due")]
    pub dpd: u32,
}

impl From<&Loan> for LoanView {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.loan_id.clone(),
            dpd: loan.days_past_due,
        }
    }
}

/// Project full loan records onto the commitment view, preserving order.
pub fn reduce(loans: &[Loan]) -> Vec<LoanView> {
    loans.iter().map(LoanView::from).collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitmentPayload<'a> {
    portfolio_id: &'a PortfolioId,
    loans: &'a [LoanView],
    summary: &'a ValidationSummary,
}

/// Canonical bytes of the commitment payload.
pub fn canonical_payload(
    portfolio_id: &PortfolioId,
    loans: &[LoanView],
    summary: &ValidationSummary,
) -> Result<CanonicalBytes, CanonicalizationError> {
    CanonicalBytes::new(&CommitmentPayload {
        portfolio_id,
        loans,
        summary,
    })
}

/// Compute the data hash for a portfolio snapshot.
pub fn commitment_hash(
    portfolio_id: &PortfolioId,
    loans: &[LoanView],
    summary: &ValidationSummary,
) -> Result<DataHash, CanonicalizationError> {
    let bytes = canonical_payload(portfolio_id, loans, summary)?;
    Ok(sha256_digest(&bytes))
}
