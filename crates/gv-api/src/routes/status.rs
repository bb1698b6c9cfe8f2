//! Service health and outage simulation. Both stay available offline.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use gv_attest::{OutageRequest, ServiceHealth};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/simulate/outage", post(simulate_outage))
}

/// GET /v1/status
async fn status(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(state.vault.get_status().await)
}

/// POST /v1/simulate/outage
async fn simulate_outage(
    State(state): State<AppState>,
    body: Result<Json<OutageRequest>, JsonRejection>,
) -> Result<Json<ServiceHealth>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(state.vault.simulate_outage(&req).await?))
}
