//! Enrichment endpoints
//!
//! Always 200 once the required key is present; the body falls back to a
//! generic record when the collaborator fails. The `x-content-source` header
//! says which.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use career_common::AcademicProfile;
use serde::Serialize;
use serde_json::Value;

use super::{object, optional_str, required_str, CONTENT_SOURCE_HEADER};
use crate::enrichment::Enriched;
use crate::error::ApiResult;
use crate::AppState;

fn respond<T: Serialize>(enriched: Enriched<T>) -> impl IntoResponse {
    (
        [(CONTENT_SOURCE_HEADER, enriched.source.as_str())],
        Json(enriched.data),
    )
}

/// POST /api/career-detail `{career}`
pub async fn career_detail(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let career = required_str(object(&body)?, "career")?;

    Ok(respond(state.enrichment.career_detail(&career).await))
}

/// POST /api/career-roadmap `{career, academicProfile?}`
pub async fn career_roadmap(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let map = object(&body)?;
    let career = required_str(map, "career")?;

    let profile = match map.get("academicProfile").or_else(|| map.get("academic_profile")) {
        None | Some(Value::Null) => None,
        Some(raw) => Some(AcademicProfile::from_json(raw)?),
    };

    Ok(respond(state.enrichment.career_roadmap(&career, profile).await))
}

/// POST /api/alternative-careers `{career}`
pub async fn alternative_careers(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let career = required_str(object(&body)?, "career")?;

    Ok(respond(state.enrichment.alternative_careers(&career).await))
}

/// POST /api/institution-summary `{name, additionalInfo?}`
pub async fn institution_summary(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let map = object(&body)?;
    let name = required_str(map, "name")?;
    let additional_info = optional_str(map, &["additionalInfo", "additional_info"]);

    Ok(respond(
        state
            .enrichment
            .institution_summary(&name, additional_info)
            .await,
    ))
}

pub fn enrichment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/career-detail", post(career_detail))
        .route("/api/career-roadmap", post(career_roadmap))
        .route("/api/alternative-careers", post(alternative_careers))
        .route("/api/institution-summary", post(institution_summary))
}
