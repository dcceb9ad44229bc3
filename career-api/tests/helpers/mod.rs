//! Shared fixtures for career-api integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use career_api::content::{ContentService, DisabledContentService};
use career_api::degradation::DegradationState;
use career_api::inference::artifacts::{
    LabelDecoder, ModelArtifact, StandardScaler, LABELS_FILE, MODEL_FILE, SCALER_FILE,
};
use career_api::inference::{
    InferenceAdapter, LocalInferenceAdapter, LocalModel, RemoteInferenceClient, StaticFallback,
};
use career_api::orchestrator::PredictionOrchestrator;
use career_api::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const CLASSES: [&str; 3] = ["Software Engineer", "Doctor", "Lawyer"];

/// Linear model over raw scores: math + physics → Software Engineer,
/// chemistry + biology → Doctor, history + english → Lawyer
pub fn model_json() -> Value {
    json!({
        "kind": "linear",
        "coefficients": [
            [1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        ],
        "intercepts": [0.0, 0.0, 0.0]
    })
}

pub fn scaler_json() -> Value {
    json!({ "mean": vec![0.0; 7], "scale": vec![1.0; 7] })
}

pub fn labels_json() -> Value {
    json!({ "classes": CLASSES })
}

pub fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join(SCALER_FILE), scaler_json().to_string()).unwrap();
    std::fs::write(dir.join(MODEL_FILE), model_json().to_string()).unwrap();
    std::fs::write(dir.join(LABELS_FILE), labels_json().to_string()).unwrap();
}

pub fn local_model() -> LocalModel {
    let scaler: StandardScaler = serde_json::from_value(scaler_json()).unwrap();
    let model: ModelArtifact = serde_json::from_value(model_json()).unwrap();
    let labels: LabelDecoder = serde_json::from_value(labels_json()).unwrap();
    LocalModel::new(scaler, model, labels)
}

/// Router over the real Local and Remote adapters, no content service
pub fn app(local: LocalInferenceAdapter, remote_url: Option<String>, remote_timeout: Duration) -> (Router, Arc<DegradationState>) {
    let degradation = Arc::new(DegradationState::new(
        local.is_available(),
        remote_url.is_some(),
        false,
    ));
    let remote = RemoteInferenceClient::new(remote_url, remote_timeout, Arc::clone(&degradation)).unwrap();

    let tiers: Vec<Arc<dyn InferenceAdapter>> = vec![Arc::new(local), Arc::new(remote)];
    let prediction = PredictionOrchestrator::new(tiers, StaticFallback::default());
    let state = AppState::from_parts(
        prediction,
        Arc::new(DisabledContentService),
        Duration::from_secs(2),
        Arc::clone(&degradation),
    );
    (build_router(state), degradation)
}

/// Router with a specific content service and no model tiers
pub fn content_app(content: Arc<dyn ContentService>) -> Router {
    let degradation = Arc::new(DegradationState::new(false, false, content.is_configured()));
    let state = AppState::from_parts(
        PredictionOrchestrator::new(Vec::new(), StaticFallback::default()),
        content,
        Duration::from_secs(2),
        degradation,
    );
    build_router(state)
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
