//! Response assembly
//!
//! Combines the prediction with any requested enrichments into the
//! caller-facing payload. `degraded` is true whenever any part of the answer
//! came from a fallback.

use career_common::PredictionResult;
use serde::Serialize;

use crate::enrichment::EnrichmentBundle;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub prediction: PredictionResult,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentBundle>,
}

pub fn assemble(prediction: PredictionResult, enrichment: Option<EnrichmentBundle>) -> RecommendationResponse {
    let enrichment_degraded = enrichment.as_ref().is_some_and(|bundle| {
        bundle.career_detail.as_ref().is_some_and(|e| e.is_fallback())
            || bundle.career_roadmap.as_ref().is_some_and(|e| e.is_fallback())
            || bundle.alternative_careers.as_ref().is_some_and(|e| e.is_fallback())
    });

    RecommendationResponse {
        degraded: prediction.is_degraded() || enrichment_degraded,
        prediction,
        enrichment,
    }
}
