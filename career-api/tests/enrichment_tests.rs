//! Enrichment and chat endpoint integration tests

mod helpers;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use career_api::content::http_client::ContentConfig;
use career_api::content::{ContentService, ContentTopic, DisabledContentService, HttpContentService};
use career_api::degradation::{DegradationState, Reachability};
use serde_json::{json, Value};

use helpers::{content_app, post_json, spawn_server};

fn offline_app() -> Router {
    content_app(Arc::new(DisabledContentService))
}

/// Content service stub: answers each topic from `replies`, records auth headers
async fn content_stub(replies: Value, seen_auth: Arc<Mutex<Vec<String>>>) -> String {
    let router = Router::new().route(
        "/:topic",
        post(move |Path(topic): Path<String>, headers: HeaderMap| {
            let replies = replies.clone();
            let seen_auth = Arc::clone(&seen_auth);
            async move {
                if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    seen_auth.lock().unwrap().push(auth.to_string());
                }
                match replies.get(&topic) {
                    Some(reply) => (StatusCode::OK, Json(reply.clone())),
                    None => (StatusCode::NOT_FOUND, Json(json!({"error": "unknown topic"}))),
                }
            }
        }),
    );
    spawn_server(router).await
}

fn http_content(base_url: String, degradation: Arc<DegradationState>) -> Arc<HttpContentService> {
    Arc::new(
        HttpContentService::new(
            ContentConfig {
                base_url: Some(base_url),
                api_key: Some("secret-key".to_string()),
                timeout: Duration::from_secs(2),
                requests_per_second: 100,
            },
            degradation,
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn career_detail_known_career_is_static() {
    let (status, headers, body) = post_json(
        offline_app(),
        "/api/career-detail",
        json!({"career": "Data Scientist"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "static");
    assert!(!body["education"].as_str().unwrap().is_empty());
    assert!(!body["pros"].as_array().unwrap().is_empty());
    assert!(!body["cons"].as_array().unwrap().is_empty());
    assert!(body["workLifeBalance"]["rating"].is_number());
}

#[tokio::test]
async fn career_detail_unknown_career_is_generic() {
    let (status, headers, body) = post_json(
        offline_app(),
        "/api/career-detail",
        json!({"career": "Professional Kite Surfer"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "fallback");
    assert!(body["description"]
        .as_str()
        .unwrap()
        .contains("Professional Kite Surfer"));
    assert!(!body["skills"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn career_detail_requires_career() {
    for body in [json!({}), json!({"career": "  "}), json!({"career": 42})] {
        let (status, _, response) = post_json(offline_app(), "/api/career-detail", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["code"], "MISSING_FIELD");
        assert_eq!(response["field"], "career");
    }
}

#[tokio::test]
async fn alternatives_sorted_and_capped() {
    let (status, _, body) = post_json(
        offline_app(),
        "/api/alternative-careers",
        json!({"career": "Software Engineer"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert!(!matches.is_empty() && matches.len() <= 5);

    let scores: Vec<f64> = matches
        .iter()
        .map(|m| m["matchingScore"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(matches.iter().all(|m| m["career"] != "Software Engineer"));
}

#[tokio::test]
async fn roadmap_fallback_uses_academic_profile() {
    let (status, headers, body) = post_json(
        offline_app(),
        "/api/career-roadmap",
        json!({
            "career": "Doctor",
            "academicProfile": {"biology_score": 97, "chemistry_score": 91, "math_score": 60}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "fallback");
    let goals: Vec<&str> = body["shortTermGoals"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(goals.iter().any(|g| g.contains("Biology and Chemistry")));
    assert!(!body["longTermGoals"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn roadmap_invalid_profile_is_client_error() {
    let (status, _, body) = post_json(
        offline_app(),
        "/api/career-roadmap",
        json!({"career": "Doctor", "academicProfile": {"biology_score": "high"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "biology_score");
}

#[tokio::test]
async fn institution_summary_requires_name() {
    let (status, _, body) = post_json(
        offline_app(),
        "/api/institution-summary",
        json!({"additionalInfo": "engineering"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");

    let (status, headers, body) = post_json(
        offline_app(),
        "/api/institution-summary",
        json!({"name": "Riverside Polytechnic"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "fallback");
    assert_eq!(body["name"], "Riverside Polytechnic");
}

#[tokio::test]
async fn generated_content_flows_through_http_service() {
    // Given: a content service that knows career details and institution summaries
    let seen_auth = Arc::new(Mutex::new(Vec::new()));
    let base_url = content_stub(
        json!({
            "career-detail": {
                "description": "Designs ocean-going vessels",
                "required_skills": ["Physics", "CAD"],
                "salary_range": "$70,000 - $140,000",
                "education": "Degree in naval architecture",
                "difficulty": 8,
                "job_outlook": "Steady",
                "day_to_day": "Hull design",
                "advancement": "Chief naval architect",
                "work_life_balance": {"rating": 6, "explanation": "Project peaks"},
                "pros": ["Big projects"],
                "cons": ["Niche market"]
            },
            "institution-summary": {
                "name": "Harbour Institute",
                "overview": "Maritime engineering school",
                "programs": ["Naval Architecture"]
            }
        }),
        Arc::clone(&seen_auth),
    )
    .await;
    let degradation = Arc::new(DegradationState::new(false, false, true));
    let app = content_app(http_content(base_url, Arc::clone(&degradation)));

    // When: asking about a career outside the knowledge table
    let (status, headers, body) = post_json(
        app.clone(),
        "/api/career-detail",
        json!({"career": "Naval Architect"}),
    )
    .await;

    // Then: the generated profile is served and tagged
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "generated");
    assert_eq!(body["description"], "Designs ocean-going vessels");
    assert_eq!(body["salaryRange"], "$70,000 - $140,000");

    let (_, headers, body) = post_json(
        app,
        "/api/institution-summary",
        json!({"name": "Harbour Institute"}),
    )
    .await;
    assert_eq!(headers.get("x-content-source").unwrap(), "generated");
    assert_eq!(body["programs"], json!(["Naval Architecture"]));

    assert!(seen_auth
        .lock()
        .unwrap()
        .iter()
        .all(|auth| auth == "Bearer secret-key"));
    assert_eq!(seen_auth.lock().unwrap().len(), 2);
    assert_eq!(degradation.content_service(), Reachability::Healthy);
}

#[tokio::test]
async fn content_requests_beyond_quota_wait() {
    // Given: a content service limited to 2 requests per second
    let base_url = content_stub(
        json!({"chat": {"response": "hi"}}),
        Arc::new(Mutex::new(Vec::new())),
    )
    .await;
    let service = HttpContentService::new(
        ContentConfig {
            base_url: Some(base_url),
            api_key: None,
            timeout: Duration::from_secs(2),
            requests_per_second: 2,
        },
        Arc::new(DegradationState::new(false, false, true)),
    )
    .unwrap();

    // When: sending three requests back to back
    let started = Instant::now();
    let mut finished = Vec::new();
    for _ in 0..3 {
        service
            .generate(ContentTopic::Chat, json!({"message": "hello"}))
            .await
            .unwrap();
        finished.push(started.elapsed());
    }

    // Then: the burst passes immediately and the third waits for a new permit
    assert!(finished[1] < Duration::from_millis(250), "burst delayed: {:?}", finished);
    assert!(finished[2] >= Duration::from_millis(400), "not throttled: {:?}", finished);
}

#[tokio::test]
async fn unreachable_content_service_degrades_to_fallback() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let degradation = Arc::new(DegradationState::new(false, false, true));
    let app = content_app(http_content(format!("http://{}", addr), Arc::clone(&degradation)));

    let (status, headers, body) = post_json(
        app,
        "/api/career-roadmap",
        json!({"career": "Marine Biologist"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "fallback");
    assert!(!body["shortTermGoals"].as_array().unwrap().is_empty());
    assert_eq!(degradation.content_service(), Reachability::Unhealthy);
}

#[tokio::test]
async fn chat_requires_message() {
    let (status, _, body) = post_json(
        offline_app(),
        "/api/chat",
        json!({"career": "Software Engineering", "gpa": 3.5}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert_eq!(body["field"], "message");
}

#[tokio::test]
async fn chat_falls_back_with_session() {
    let (status, headers, body) = post_json(
        offline_app(),
        "/api/chat",
        json!({
            "message": "Tell me about computer science",
            "career": "Software Engineering",
            "gpa": 3.5,
            "subject_grades": {"math": "A", "physics": "B"},
            "session_id": "test-session"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-content-source").unwrap(), "fallback");
    assert_eq!(body["sessionId"], "test-session");
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn chatbot_recommend_validation_and_fallback() {
    for body in [json!({"gpa": 3.8}), json!({"career": "Computer Science"})] {
        let (status, _, _) = post_json(offline_app(), "/api/chatbot-recommend", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _, body) = post_json(
        offline_app(),
        "/api/chatbot-recommend",
        json!({"gpa": "3.8", "career": "Accountant"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_universities"], json!([]));
    assert!(!body["similar_careers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chatbot_recommend_generated() {
    let seen_auth = Arc::new(Mutex::new(Vec::new()));
    let base_url = content_stub(
        json!({
            "chatbot-recommend": {
                "recommended_universities": ["University A", "University B"],
                "similar_careers": ["Career A", "Career B"]
            }
        }),
        seen_auth,
    )
    .await;
    let degradation = Arc::new(DegradationState::new(false, false, true));
    let app = content_app(http_content(base_url, degradation));

    let (status, _, body) = post_json(
        app,
        "/api/chatbot-recommend",
        json!({"gpa": 3.8, "career": "Computer Science"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_universities"], json!(["University A", "University B"]));
    assert_eq!(body["similar_careers"], json!(["Career A", "Career B"]));
}
