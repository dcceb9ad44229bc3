//! career-api library interface
//!
//! Exposes the application state and router for the binary and for
//! integration tests.

pub mod api;
pub mod assembler;
pub mod chat;
pub mod config;
pub mod content;
pub mod degradation;
pub mod enrichment;
pub mod error;
pub mod inference;
pub mod orchestrator;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::ChatService;
use crate::content::ContentService;
use crate::degradation::DegradationState;
use crate::enrichment::EnrichmentOrchestrator;
use crate::inference::InferenceContext;
use crate::orchestrator::PredictionOrchestrator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub prediction: Arc<PredictionOrchestrator>,
    pub enrichment: EnrichmentOrchestrator,
    pub chat: Arc<ChatService>,
    pub degradation: Arc<DegradationState>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the orchestrators to the startup context. `content_timeout`
    /// bounds every generative call.
    pub fn new(
        context: &InferenceContext,
        content: Arc<dyn ContentService>,
        content_timeout: Duration,
    ) -> Self {
        Self {
            prediction: Arc::new(PredictionOrchestrator::from_context(context)),
            enrichment: EnrichmentOrchestrator::new(Arc::clone(&content), content_timeout),
            chat: Arc::new(ChatService::new(content, content_timeout)),
            degradation: Arc::clone(&context.degradation),
            startup_time: Utc::now(),
        }
    }

    /// State with explicit parts, for tests and embedding
    pub fn from_parts(
        prediction: PredictionOrchestrator,
        content: Arc<dyn ContentService>,
        content_timeout: Duration,
        degradation: Arc<DegradationState>,
    ) -> Self {
        Self {
            prediction: Arc::new(prediction),
            enrichment: EnrichmentOrchestrator::new(Arc::clone(&content), content_timeout),
            chat: Arc::new(ChatService::new(content, content_timeout)),
            degradation,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::prediction_routes())
        .merge(api::enrichment_routes())
        .merge(api::chat_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
