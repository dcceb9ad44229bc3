//! Banner and health endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::degradation::DegradationSnapshot;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when a collaborator is missing or failing
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub uptime_seconds: u64,
    pub degradation: DegradationSnapshot,
}

/// GET /
pub async fn banner() -> Json<Value> {
    Json(json!({ "message": "Career Recommendation API" }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let degradation = state.degradation.snapshot();

    Json(HealthResponse {
        status: if degradation.is_degraded() { "degraded" } else { "ok" },
        module: "career-api",
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
        degradation,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}
