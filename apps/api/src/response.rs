//! Request/response envelope shared by every endpoint.
//!
//! Success bodies are the handler's result object with `"status": "success"`
//! merged in; failures go through `AppError`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// JSON body extractor whose rejections render through `AppError`,
/// so malformed bodies get the same `{error, status}` shape as everything else.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Query-string extractor with `AppError` rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Path extractor with `AppError` rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// `?user_id=` on every record listing.
#[derive(Debug, Deserialize)]
pub struct UserScope {
    pub user_id: Uuid,
}

/// Wrapper for list responses: `{ "items": [...], "status": "success" }`.
#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct Success<T> {
    #[serde(flatten)]
    pub body: T,
    pub status: &'static str,
}

pub type ApiResult<T> = Result<Json<Success<T>>, AppError>;

pub fn success<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(Json(Success {
        body,
        status: "success",
    }))
}

/// Serializes a typed result for storage in a JSON column.
pub fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.into()))
}

/// Returns the trimmed value, or `None` for absent and blank inputs.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trims every entry and drops blanks. An empty result counts as absent.
pub fn present_list(values: Option<&[String]>) -> Option<Vec<String>> {
    let cleaned: Vec<String> = values?
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
