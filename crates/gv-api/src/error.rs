//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps `ServiceError` variants to HTTP status codes and returns JSON error
//! bodies with a machine-readable code. Internal details never reach the
//! client.
//!
//! Verification never produces an `AppError` for an unknown proof id; that
//! is a `200` with `status: "not_found"`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gv_attest::ServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. `NOT_FOUND`.
    pub code: String,
    pub message: String,
}

/// Application-level error returned by handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown dataset or proof (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed loan data or request rule violation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Body or path could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Ledger or remote dependency unreachable (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Logged, never returned (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable { .. } => Self::ServiceUnavailable(err.to_string()),
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::ValidationData(_) | ServiceError::Ingest(_) => {
                Self::Validation(err.to_string())
            }
            ServiceError::Health(_) => Self::BadRequest(err.to_string()),
            ServiceError::Canonicalization(_) | ServiceError::Ledger(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
