//! # Dataset Endpoints
//!
//! Listing and retrieval go through the online gate. Validation of a stored
//! dataset runs on the local store and stays available offline.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gv_attest::{reduce, standard_claim, LoanView};
use gv_core::{LoanId, PortfolioId};
use gv_portfolio::{DatasetSummary, Portfolio, ValidationSummary};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Result of validating a stored dataset.
///
/// Carries everything a client needs for a follow-up `POST /v1/attest`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub portfolio_id: PortfolioId,
    pub claim: String,
    pub validation_summary: ValidationSummary,
    pub breaching_loans: Vec<LoanId>,
    pub covenant_flags: BTreeMap<String, u64>,
    /// The reduced loan view that enters the commitment.
    pub loans: Vec<LoanView>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/datasets", get(list_datasets))
        .route("/v1/datasets/:id", get(get_dataset))
        .route("/v1/datasets/:id/validate", post(validate_dataset))
}

/// GET /v1/datasets
async fn list_datasets(State(state): State<AppState>) -> Result<Json<Vec<DatasetSummary>>, AppError> {
    Ok(Json(state.vault.list_datasets().await?))
}

/// GET /v1/datasets/:id
async fn get_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Portfolio>, AppError> {
    let portfolio = state.vault.get_dataset(&id).await?;
    Ok(Json(Portfolio::clone(&portfolio)))
}

/// POST /v1/datasets/:id/validate
async fn validate_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ValidationResponse>, AppError> {
    let portfolio = state
        .vault
        .get_dataset_local(&id)
        .ok_or_else(|| AppError::NotFound(format!("dataset not found: {id}")))?;
    let report = state.vault.evaluate(&portfolio)?;
    Ok(Json(ValidationResponse {
        portfolio_id: portfolio.id().clone(),
        claim: standard_claim(&report.summary).to_string(),
        validation_summary: report.summary,
        breaching_loans: report.breaching_loans,
        covenant_flags: report.covenant_flags,
        loans: reduce(portfolio.loans()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(start_offline: bool) -> Router {
        let state = AppState::try_new(AppConfig {
            start_offline,
            ..AppConfig::default()
        })
        .unwrap();
        router().with_state(state)
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_datasets() {
        let (status, body) = call(app(false), "GET", "/v1/datasets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "healthy-1");
        assert_eq!(body[0]["asOf"], "2026-02-01");
        assert_eq!(body[1]["loans"], 20);
    }

    #[tokio::test]
    async fn get_dataset_returns_loans() {
        let (status, body) = call(app(false), "GET", "/v1/datasets/distressed-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["portfolio_id"], "distressed-1");
        assert_eq!(body["loans"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn unknown_dataset_is_404() {
        let (status, body) = call(app(false), "GET", "/v1/datasets/nope-1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn offline_listing_is_503() {
        let (status, _) = call(app(true), "GET", "/v1/datasets").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn validation_works_offline() {
        let (status, body) = call(app(true), "POST", "/v1/datasets/distressed-1/validate").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["claim"], "Validation Failed");
        assert_eq!(body["validationSummary"]["passed"], false);
        assert_eq!(body["validationSummary"]["loansOver90"], 4);
        assert_eq!(body["breachingLoans"][0], "L-0101");
        assert_eq!(body["loans"][0]["id"], "L-0101");
    }
}
