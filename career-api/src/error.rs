//! Error types for career-api
//!
//! Only invalid requests become client errors. Tier and enrichment failures
//! are absorbed further down and never reach this type.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use career_common::ValidationError;
use serde_json::json;
use thiserror::Error;

use crate::chat::ChatRequestError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Academic profile failed validation (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Required key absent (400)
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Malformed chat request (400)
    #[error(transparent)]
    Chat(#[from] ChatRequestError),

    /// Body was not JSON (400)
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, Option<&str>) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", None),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.field()),
            ApiError::MissingField(field) => (StatusCode::BAD_REQUEST, "MISSING_FIELD", Some(*field)),
            ApiError::Chat(err) => {
                let code = match err {
                    ChatRequestError::Missing(_) => "MISSING_FIELD",
                    _ => "VALIDATION_ERROR",
                };
                (StatusCode::BAD_REQUEST, code, err.field())
            }
            ApiError::Json(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON", None),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, field) = self.parts();
        tracing::debug!(error = %self, code, "Request rejected");

        let mut body = json!({
            "error": self.to_string(),
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
