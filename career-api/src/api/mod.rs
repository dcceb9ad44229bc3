//! HTTP API handlers for career-api

pub mod chat;
pub mod enrichment;
pub mod health;
pub mod predict;

pub use chat::chat_routes;
pub use enrichment::enrichment_routes;
pub use health::health_routes;
pub use predict::prediction_routes;

use axum::http::Uri;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Response header naming the enrichment content source
pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Request body as a JSON object
pub(crate) fn object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ApiError::BadRequest("request body must be a JSON object".to_string()))
}

/// Non-blank string under `key`
pub(crate) fn required_str(map: &Map<String, Value>, key: &'static str) -> ApiResult<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingField(key))
}

/// Optional string under any of `keys`; blank counts as absent
pub(crate) fn optional_str(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
