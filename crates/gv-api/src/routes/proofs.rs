//! # Proof Endpoints
//!
//! Attestation, verification, evidence export and the recent-proofs listing.
//!
//! `POST /v1/verify/:proof_id` always answers `200` with a `status` of
//! `verified`, `mismatch` or `not_found`. Only unavailability (`503`) and
//! malformed bodies (`400`) are errors.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gv_attest::{standard_claim, Attestation, Evidence, LoanView, ProofListing, VerificationOutcome};
use gv_core::PortfolioId;
use gv_portfolio::ValidationSummary;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_query, extract_validated_json, proof_id, Validate};
use crate::state::AppState;

/// Upper bound on `GET /v1/proofs?limit=`.
const MAX_PROOF_LIMIT: usize = 100;

/// Body of `POST /v1/attest`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttestRequest {
    pub portfolio_id: PortfolioId,
    /// Defaults to the standard claim for the summary's outcome.
    #[serde(default)]
    pub claim: Option<String>,
    pub loans: Vec<LoanView>,
    #[serde(rename = "validationSummary", alias = "summary")]
    pub validation_summary: ValidationSummary,
}

impl Validate for AttestRequest {
    fn validate(&self) -> Result<(), String> {
        if matches!(&self.claim, Some(c) if c.trim().is_empty()) {
            return Err("claim must not be blank".into());
        }
        if self.validation_summary.total_loans != self.loans.len() as u64 {
            return Err(format!(
                "summary covers {} loans but {} were submitted",
                self.validation_summary.total_loans,
                self.loans.len()
            ));
        }
        Ok(())
    }
}

/// Body of `POST /v1/verify/:proof_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub loans: Vec<LoanView>,
    #[serde(rename = "validationSummary", alias = "summary")]
    pub validation_summary: ValidationSummary,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/attest", post(attest))
        .route("/v1/verify/:proof_id", post(verify))
        .route("/v1/evidence/:proof_id", get(evidence))
        .route("/v1/proofs", get(list_proofs))
}

/// POST /v1/attest
async fn attest(
    State(state): State<AppState>,
    body: Result<Json<AttestRequest>, JsonRejection>,
) -> Result<Json<Attestation>, AppError> {
    let req = extract_validated_json(body)?;
    let claim = req
        .claim
        .unwrap_or_else(|| standard_claim(&req.validation_summary).to_string());
    let attestation = state
        .vault
        .attest(&req.portfolio_id, &claim, &req.loans, &req.validation_summary)
        .await?;
    Ok(Json(attestation))
}

/// POST /v1/verify/:proof_id
async fn verify(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationOutcome>, AppError> {
    let id = proof_id(&raw_id)?;
    let req = extract_json(body)?;
    let outcome = state
        .vault
        .verify(&id, &req.loans, &req.validation_summary)
        .await?;
    Ok(Json(outcome))
}

/// GET /v1/evidence/:proof_id
async fn evidence(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Evidence>, AppError> {
    let id = proof_id(&raw_id)?;
    Ok(Json(state.vault.get_evidence(&id).await?))
}

/// GET /v1/proofs?limit=n
async fn list_proofs(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ProofListing>>, AppError> {
    let params = extract_query(params)?;
    let limit = params.limit.map(|n| n.min(MAX_PROOF_LIMIT));
    Ok(Json(state.vault.list_recent_proofs(limit).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{LoanId, Timestamp};

    fn summary(total: u64) -> ValidationSummary {
        ValidationSummary {
            passed: true,
            total_loans: total,
            loans_over_90: 0,
            nav_estimate: 0,
            timestamp: Timestamp::parse("2026-02-01T12:00:00Z").unwrap(),
        }
    }

    fn request(claim: Option<&str>, total: u64) -> AttestRequest {
        AttestRequest {
            portfolio_id: PortfolioId::new("healthy-1").unwrap(),
            claim: claim.map(str::to_string),
            loans: vec![LoanView {
                id: LoanId::new("L-0001").unwrap(),
                dpd: 0,
            }],
            validation_summary: summary(total),
        }
    }

    #[test]
    fn attest_request_rules() {
        assert!(request(None, 1).validate().is_ok());
        assert!(request(Some("No loan > 90 days past due"), 1).validate().is_ok());
        assert!(request(Some("   "), 1).validate().is_err());
        assert!(request(None, 2).validate().unwrap_err().contains("2 loans"));
    }

    #[test]
    fn attest_request_accepts_summary_alias() {
        let body = serde_json::json!({
            "portfolio_id": "healthy-1",
            "loans": [{"id": "L-0001", "dpd": 0}],
            "summary": {
                "passed": true, "totalLoans": 1, "loansOver90": 0,
                "navEstimate": 0, "timestamp": "2026-02-01T12:00:00Z"
            }
        });
        let req: AttestRequest = serde_json::from_value(body).unwrap();
        assert!(req.claim.is_none());
        assert_eq!(req.validation_summary.total_loans, 1);
    }
}
