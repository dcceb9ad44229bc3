//! Prediction orchestrator
//!
//! Walks the inference tiers in strict priority order (Local → Remote) and
//! drops to the static fallback when none of them answers. Always yields a
//! [`PredictionResult`]; input validation happens before this point.

use std::sync::Arc;

use career_common::{FeatureVector, PredictionResult, SourceTier};
use tracing::{debug, info, warn};

use crate::inference::{AdapterError, InferenceAdapter, InferenceContext, StaticFallback};

/// Outcome of one tier that did not serve the request
#[derive(Debug)]
pub struct TierAttempt {
    pub tier: SourceTier,
    pub error: AdapterError,
}

impl TierAttempt {
    fn describe(&self) -> String {
        format!("{} {}", tier_label(self.tier), self.error.summary())
    }

    /// Attempted and failed, as opposed to skipped
    fn was_attempted(&self) -> bool {
        !self.error.is_unavailable()
    }
}

pub struct PredictionOrchestrator {
    tiers: Vec<Arc<dyn InferenceAdapter>>,
    fallback: StaticFallback,
}

impl PredictionOrchestrator {
    /// Tiers are tried in the order given
    pub fn new(tiers: Vec<Arc<dyn InferenceAdapter>>, fallback: StaticFallback) -> Self {
        Self { tiers, fallback }
    }

    pub fn from_context(context: &InferenceContext) -> Self {
        let local: Arc<dyn InferenceAdapter> = context.local.clone();
        let remote: Arc<dyn InferenceAdapter> = context.remote.clone();
        Self::new(vec![local, remote], StaticFallback::default())
    }

    /// Predict a career for an already-validated vector
    pub async fn predict(&self, vector: &FeatureVector) -> PredictionResult {
        let mut attempts: Vec<TierAttempt> = Vec::new();

        for adapter in &self.tiers {
            let tier = adapter.tier();

            if !adapter.is_available() {
                debug!(tier = tier.as_str(), "Tier unavailable, skipping");
                attempts.push(TierAttempt {
                    tier,
                    error: AdapterError::Unavailable {
                        tier,
                        reason: "not available".to_string(),
                    },
                });
                continue;
            }

            match adapter.predict(vector).await {
                Ok(career) => {
                    info!(tier = tier.as_str(), career = %career, "Prediction served");
                    let result = PredictionResult::new(career, tier);
                    return match degradation_note(&attempts) {
                        Some(note) => result.with_note(note),
                        None => result,
                    };
                }
                Err(e) => {
                    if e.is_unavailable() {
                        debug!(tier = tier.as_str(), error = %e, "Tier unavailable, skipping");
                    } else {
                        warn!(tier = tier.as_str(), error = %e, "Tier failed, falling through");
                    }
                    attempts.push(TierAttempt { tier, error: e });
                }
            }
        }

        let career = self.fallback.pick();
        info!(career = %career, "Prediction served by static fallback");
        PredictionResult::new(career, SourceTier::Fallback).with_note(fallback_note(&attempts))
    }
}

fn tier_label(tier: SourceTier) -> &'static str {
    match tier {
        SourceTier::Local => "local model",
        SourceTier::Remote => "remote inference",
        SourceTier::Fallback => "static fallback",
    }
}

/// Note for a model-tier result; only set when an earlier tier was attempted and failed
fn degradation_note(attempts: &[TierAttempt]) -> Option<String> {
    let failed: Vec<String> = attempts
        .iter()
        .filter(|a| a.was_attempted())
        .map(TierAttempt::describe)
        .collect();

    if failed.is_empty() {
        None
    } else {
        Some(format!("Degraded: {}", failed.join("; ")))
    }
}

fn fallback_note(attempts: &[TierAttempt]) -> String {
    if attempts.is_empty() {
        return "Served by static fallback: no prediction tiers configured".to_string();
    }
    let reasons: Vec<String> = attempts.iter().map(TierAttempt::describe).collect();
    format!("Served by static fallback: {}", reasons.join("; "))
}
