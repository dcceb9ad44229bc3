//! Prediction endpoints
//!
//! Validation runs before any tier is attempted; once a request is valid
//! the answer is always 200.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use career_common::{AcademicProfile, PredictionResult};
use serde_json::Value;
use tracing::debug;

use super::object;
use crate::assembler::{assemble, RecommendationResponse};
use crate::enrichment::EnrichmentKind;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Json(body) = body?;
    let profile = AcademicProfile::from_json(&body)?;

    let result = state.prediction.predict(&profile.to_vector()).await;
    Ok(Json(result))
}

/// POST /api/recommend
///
/// Profile fields plus an optional `enrich` list of kinds to attach.
pub async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<RecommendationResponse>> {
    let Json(body) = body?;
    let profile = AcademicProfile::from_json(&body)?;
    let kinds = parse_enrich(object(&body)?.get("enrich"))?;

    let prediction = state.prediction.predict(&profile.to_vector()).await;

    let enrichment = if kinds.is_empty() {
        None
    } else {
        debug!(career = %prediction.career, kinds = kinds.len(), "Enriching recommendation");
        Some(
            state
                .enrichment
                .enrich_all(&prediction.career, Some(profile), &kinds)
                .await,
        )
    };

    Ok(Json(assemble(prediction, enrichment)))
}

fn parse_enrich(raw: Option<&Value>) -> ApiResult<Vec<EnrichmentKind>> {
    let items = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ApiError::BadRequest(
                "enrich must be a list of enrichment kinds".to_string(),
            ))
        }
    };

    let mut kinds = Vec::with_capacity(items.len());
    for item in items {
        let kind = item
            .as_str()
            .ok_or_else(|| ApiError::BadRequest("enrich entries must be strings".to_string()))?
            .parse::<EnrichmentKind>()
            .map_err(ApiError::BadRequest)?;
        if kind == EnrichmentKind::InstitutionSummary {
            return Err(ApiError::BadRequest(
                "institution-summary is keyed by institution name; use /api/institution-summary"
                    .to_string(),
            ));
        }
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

pub fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/api/predict", post(predict))
        .route("/api/recommend", post(recommend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_enrich() {
        assert!(parse_enrich(None).unwrap().is_empty());
        assert_eq!(
            parse_enrich(Some(&json!(["career-detail", "career-detail", "career-roadmap"]))).unwrap(),
            vec![EnrichmentKind::CareerDetail, EnrichmentKind::CareerRoadmap]
        );
        assert!(parse_enrich(Some(&json!("career-detail"))).is_err());
        assert!(parse_enrich(Some(&json!(["weather"]))).is_err());
        assert!(parse_enrich(Some(&json!(["institution-summary"]))).is_err());
    }
}
