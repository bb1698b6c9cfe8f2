//! Evidence export for a registered proof.
//!
//! Sample rows carry the loan reference, days past due and valuation band of
//! the first three loans. Borrower tokens are never exported.

use gv_core::{DataHash, PortfolioId, ProofId, Timestamp};
use gv_portfolio::{Loan, Portfolio, ValidationSummary};
use serde::{Deserialize, Serialize};

use crate::record::ProofRecord;

/// Number of loans sampled into an evidence export.
pub const SAMPLE_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub loan_ref: String,
    pub days_past_due: u32,
    pub valuation_band: String,
}

impl From<&Loan> for SampleRow {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_ref: loan.reference.clone(),
            days_past_due: loan.days_past_due,
            valuation_band: loan.valuation_band.clone(),
        }
    }
}

/// A proof record plus sample rows from the attested dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "proofId")]
    pub proof_id: ProofId,
    pub portfolio_id: PortfolioId,
    pub claim: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: Timestamp,
    #[serde(rename = "dataHash")]
    pub data_hash: DataHash,
    #[serde(rename = "validationSummary")]
    pub validation_summary: ValidationSummary,
    /// Empty when the portfolio is not in the local store.
    #[serde(rename = "sampleRows")]
    pub sample_rows: Vec<SampleRow>,
}

impl Evidence {
    pub fn new(record: ProofRecord, portfolio: Option<&Portfolio>) -> Self {
        let sample_rows = portfolio
            .map(|p| p.loans().iter().take(SAMPLE_ROWS).map(SampleRow::from).collect())
            .unwrap_or_default();
        Self {
            proof_id: record.proof_id,
            portfolio_id: record.portfolio_id,
            claim: record.claim,
            generated_at: record.generated_at,
            data_hash: record.data_hash,
            validation_summary: record.validation_summary,
            sample_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_portfolio::PortfolioStore;

    fn record(portfolio: &str) -> ProofRecord {
        let ts = Timestamp::parse("2026-02-01T12:00:00Z").unwrap();
        ProofRecord {
            proof_id: ProofId::new("GV-00ABCD").unwrap(),
            portfolio_id: PortfolioId::new(portfolio).unwrap(),
            claim: "Validation Failed".into(),
            data_hash: DataHash::parse(&"f".repeat(64)).unwrap(),
            validation_summary: ValidationSummary {
                passed: false,
                total_loans: 20,
                loans_over_90: 4,
                nav_estimate: 1_677_000_000,
                timestamp: ts,
            },
            generated_by: "GlassVault Local Agent".into(),
            generated_at: ts,
        }
    }

    #[test]
    fn samples_first_three_loans_without_borrower_ids() {
        let store = PortfolioStore::seeded().unwrap();
        let portfolio = store.get_str("distressed-1").unwrap();
        let evidence = Evidence::new(record("distressed-1"), Some(&portfolio));

        assert_eq!(evidence.sample_rows.len(), 3);
        for (row, loan) in evidence.sample_rows.iter().zip(portfolio.loans()) {
            assert_eq!(row.loan_ref, loan.reference);
            assert_eq!(row.days_past_due, loan.days_past_due);
        }

        let json = serde_json::to_string(&evidence).unwrap();
        assert!(!json.contains("redacted_borrower_id"));
        assert!(!json.contains("B-xxx"));
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["proofId"], "GV-00ABCD");
        assert_eq!(v["sampleRows"][0]["loan_ref"], portfolio.loans()[0].reference);
    }

    #[test]
    fn unknown_portfolio_gives_no_samples() {
        let evidence = Evidence::new(record("archived-7"), None);
        assert!(evidence.sample_rows.is_empty());
        assert_eq!(evidence.portfolio_id.as_str(), "archived-7");
    }
}
