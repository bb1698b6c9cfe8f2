//! # Request Extraction
//!
//! Maps JSON and query rejections to [`AppError::BadRequest`] and applies
//! request-level rules through [`Validate`].

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use gv_core::ProofId;

use crate::error::AppError;

/// Rules a request DTO must satisfy beyond deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to `400`.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and check it with [`Validate`]; rule failures are `422`.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Parse a proof id path segment.
pub fn proof_id(raw: &str) -> Result<ProofId, AppError> {
    ProofId::new(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}
