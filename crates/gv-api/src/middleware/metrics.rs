//! # Request Metrics
//!
//! In-process request counters using atomics. Unavailability is counted
//! separately from other errors so offline periods stand out. `GET /metrics`
//! serves a JSON snapshot; scrapes of it are not themselves counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub unavailable_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// 4xx and 5xx responses, 503 included.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn unavailable(&self) -> u64 {
        self.unavailable_count.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests(),
            errors: self.errors(),
            unavailable: self.unavailable(),
        }
    }

    fn observe(&self, status: StatusCode) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if status.is_client_error() || status.is_server_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            self.unavailable_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Point-in-time counter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub errors: u64,
    pub unavailable: u64,
}

/// GET /metrics
pub async fn metrics_handler(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}

/// Middleware that updates the counters found in request extensions.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.observe(response.status());
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_status_class() {
        let m = ApiMetrics::new();
        m.observe(StatusCode::OK);
        m.observe(StatusCode::NOT_FOUND);
        m.observe(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(m.requests(), 3);
        assert_eq!(m.errors(), 2);
        assert_eq!(m.unavailable(), 1);
        assert_eq!(
            m.snapshot(),
            MetricsSnapshot {
                requests: 3,
                errors: 2,
                unavailable: 1
            }
        );
    }

    #[test]
    fn clones_share_counters() {
        let a = ApiMetrics::new();
        let b = a.clone();
        a.observe(StatusCode::OK);
        assert_eq!(b.requests(), 1);
    }
}
