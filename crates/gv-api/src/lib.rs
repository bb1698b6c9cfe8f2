//! # gv-api: Axum API Service for GlassVault
//!
//! HTTP surface over the `gv_attest::GlassVault` facade.
//!
//! ## API Surface
//!
//! | Method | Path                          | Module               |
//! |--------|-------------------------------|----------------------|
//! | GET    | `/v1/datasets`                | [`routes::datasets`] |
//! | GET    | `/v1/datasets/:id`            | [`routes::datasets`] |
//! | POST   | `/v1/datasets/:id/validate`   | [`routes::datasets`] |
//! | POST   | `/v1/attest`                  | [`routes::proofs`]   |
//! | POST   | `/v1/verify/:proof_id`        | [`routes::proofs`]   |
//! | GET    | `/v1/evidence/:proof_id`      | [`routes::proofs`]   |
//! | GET    | `/v1/proofs?limit=n`          | [`routes::proofs`]   |
//! | GET    | `/v1/status`                  | [`routes::status`]   |
//! | POST   | `/v1/simulate/outage`         | [`routes::status`]   |
//! | GET    | `/metrics`                    | [`middleware::metrics`] |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the application router with fresh metrics.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Assemble the application router, recording into `metrics`.
///
/// Health checks (`/health/*`) and `/metrics` sit outside the metrics and
/// trace layers.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::datasets::router())
        .merge(routes::proofs::router())
        .merge(routes::status::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics.clone()))
        .with_state(state);

    let ops = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .route("/metrics", axum::routing::get(middleware::metrics::metrics_handler))
        .layer(axum::Extension(metrics));

    Router::new().merge(ops).merge(api)
}

/// Liveness check. Always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check. The seeded store is loaded before the router exists.
async fn readiness() -> &'static str {
    "ready"
}
