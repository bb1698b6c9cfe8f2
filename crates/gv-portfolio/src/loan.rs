//! # Loans and Portfolios
//!
//! The ingested data model. Field names on the wire follow the loan tape
//! format (`loan_id`, `ref`, `days_past_due`, ...).
//!
//! A [`Portfolio`] is immutable: its fields are private and it is only
//! constructed through ingestion, which checks that the declared
//! `total_loans` (when present) matches and that loan ids are unique within
//! the portfolio.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use gv_core::{LoanId, PortfolioId};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// A single loan record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    /// External loan reference, shown in evidence exports.
    #[serde(rename = "ref")]
    pub reference: String,
    pub days_past_due: u32,
    /// Point (`"100"`) or range (`"98-100"`) price in points of par.
    pub valuation_band: String,
    #[serde(default)]
    pub covenant_flags: BTreeSet<String>,
    #[serde(default)]
    pub payment_history_summary: String,
    /// Opaque borrower token. Never hashed, never exported.
    pub redacted_borrower_id: String,
}

/// Wire shape of a portfolio document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PortfolioDocument {
    portfolio_id: PortfolioId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    as_of: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_loans: Option<usize>,
    loans: Vec<Loan>,
}

/// An ingested, immutable loan portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PortfolioDocument", into = "PortfolioDocument")]
pub struct Portfolio {
    portfolio_id: PortfolioId,
    name: Option<String>,
    as_of: NaiveDate,
    loans: Vec<Loan>,
}

impl Portfolio {
    /// Build a portfolio from parts, applying the ingestion checks.
    pub fn new(
        portfolio_id: PortfolioId,
        name: Option<String>,
        as_of: NaiveDate,
        loans: Vec<Loan>,
    ) -> Result<Self, IngestError> {
        let mut seen = HashSet::with_capacity(loans.len());
        for loan in &loans {
            if !seen.insert(&loan.loan_id) {
                return Err(IngestError::DuplicateLoanId {
                    portfolio_id: portfolio_id.to_string(),
                    loan_id: loan.loan_id.clone(),
                });
            }
        }
        Ok(Self {
            portfolio_id,
            name,
            as_of,
            loans,
        })
    }

    /// Ingest a portfolio from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        let doc: PortfolioDocument = serde_json::from_str(json)?;
        Self::try_from(doc)
    }

    pub fn id(&self) -> &PortfolioId {
        &self.portfolio_id
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.portfolio_id.as_str())
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }
}

impl TryFrom<PortfolioDocument> for Portfolio {
    type Error = IngestError;

    fn try_from(doc: PortfolioDocument) -> Result<Self, Self::Error> {
        if let Some(declared) = doc.total_loans {
            if declared != doc.loans.len() {
                return Err(IngestError::LoanCountMismatch {
                    portfolio_id: doc.portfolio_id.to_string(),
                    declared,
                    actual: doc.loans.len(),
                });
            }
        }
        Self::new(doc.portfolio_id, doc.name, doc.as_of, doc.loans)
    }
}

impl From<Portfolio> for PortfolioDocument {
    fn from(p: Portfolio) -> Self {
        Self {
            total_loans: Some(p.loans.len()),
            portfolio_id: p.portfolio_id,
            name: p.name,
            as_of: p.as_of,
            loans: p.loans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "portfolio_id": "test-1",
        "as_of": "2026-02-01",
        "total_loans": 2,
        "loans": [
            {"loan_id":"L-1","ref":"REF-1","days_past_due":0,"valuation_band":"100","covenant_flags":[],"payment_history_summary":"on time","redacted_borrower_id":"B-1"},
            {"loan_id":"L-2","ref":"REF-2","days_past_due":120,"valuation_band":"30-40","covenant_flags":["missed_payment","LTV_breach"],"payment_history_summary":"missed","redacted_borrower_id":"B-2"}
        ]
    }"#;

    #[test]
    fn ingests_loan_tape_document() {
        let p = Portfolio::from_json(DOC).unwrap();
        assert_eq!(p.id().as_str(), "test-1");
        assert_eq!(p.name(), "test-1");
        assert_eq!(p.as_of(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(p.loan_count(), 2);
        assert_eq!(p.loans()[1].reference, "REF-2");
        assert!(p.loans()[1].covenant_flags.contains("LTV_breach"));
    }

    #[test]
    fn declared_count_mismatch_rejected() {
        let doc = DOC.replace("\"total_loans\": 2", "\"total_loans\": 3");
        assert!(matches!(
            Portfolio::from_json(&doc),
            Err(IngestError::LoanCountMismatch { declared: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn duplicate_loan_id_rejected() {
        let doc = DOC.replace("\"loan_id\":\"L-2\"", "\"loan_id\":\"L-1\"");
        assert!(matches!(
            Portfolio::from_json(&doc),
            Err(IngestError::DuplicateLoanId { .. })
        ));
    }

    #[test]
    fn negative_days_past_due_rejected() {
        let doc = DOC.replace("\"days_past_due\":120", "\"days_past_due\":-1");
        assert!(matches!(Portfolio::from_json(&doc), Err(IngestError::Json(_))));
    }

    #[test]
    fn serializes_with_ref_and_total_loans() {
        let p = Portfolio::from_json(DOC).unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["total_loans"], 2);
        assert_eq!(v["loans"][0]["ref"], "REF-1");
        let back: Portfolio = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }
}
