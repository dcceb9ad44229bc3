//! Chat endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;

use super::CONTENT_SOURCE_HEADER;
use crate::chat::{ChatMessage, UniversityQuery};
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let message = ChatMessage::from_json(&body)?;

    let (reply, source) = state.chat.chat(message).await;
    Ok(([(CONTENT_SOURCE_HEADER, source.as_str())], Json(reply)))
}

/// POST /api/chatbot-recommend
pub async fn chatbot_recommend(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let query = UniversityQuery::from_json(&body)?;

    let (recommendation, source) = state.chat.recommend(&query).await;
    Ok(([(CONTENT_SOURCE_HEADER, source.as_str())], Json(recommendation)))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chatbot-recommend", post(chatbot_recommend))
}
