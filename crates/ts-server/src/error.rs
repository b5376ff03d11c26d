//! Request-shape errors and their 400 JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::BTreeMap;
use thiserror::Error;
use ts_core::api::ErrorResponse;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const MALFORMED_BODY: &str = "Malformed request body";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required fields missing or blank; field → message.
    #[error("validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),
    /// Body is not JSON or a field has the wrong format.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(errors) => ErrorResponse::new(VALIDATION_FAILED, errors.clone()),
            ApiError::MalformedBody(_) => ErrorResponse::new(
                MALFORMED_BODY,
                BTreeMap::from([
                    ("body".to_string(), "Invalid JSON or field format".to_string()),
                    (
                        "timestamp".to_string(),
                        "must be ISO-8601, e.g. 2025-08-21T12:00:00Z".to_string(),
                    ),
                ]),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(errors) => tracing::warn!("Validation failed: {errors:?}"),
            ApiError::MalformedBody(cause) => tracing::warn!("Malformed request body: {cause}"),
        }
        (StatusCode::BAD_REQUEST, Json(self.to_error_response())).into_response()
    }
}
