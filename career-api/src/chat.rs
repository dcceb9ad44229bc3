//! Conversation collaborators
//!
//! Free-form chat and the chatbot university recommendation, both served by
//! the generative content service with canned fallbacks.

use std::sync::Arc;
use std::time::Duration;

use career_common::ContentSource;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::content::{generate_as, ContentError, ContentService, ContentTopic};
use crate::enrichment::alternatives::skill_overlap_matches;

/// Similar careers offered when the collaborator is unavailable
const FALLBACK_SIMILAR_CAREERS: usize = 3;

/// Invalid chat request
#[derive(Debug, Error)]
pub enum ChatRequestError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("field {0} must be numeric")]
    NotNumeric(&'static str),
}

impl ChatRequestError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ChatRequestError::NotAnObject => None,
            ChatRequestError::Missing(field) | ChatRequestError::NotNumeric(field) => Some(field),
        }
    }
}

/// Incoming chat message with optional student context
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub message: String,
    pub career: Option<String>,
    pub gpa: Option<f64>,
    pub subject_grades: Option<Value>,
    pub session_id: Option<String>,
}

impl ChatMessage {
    pub fn from_json(raw: &Value) -> Result<Self, ChatRequestError> {
        let map = raw.as_object().ok_or(ChatRequestError::NotAnObject)?;

        let message = string_field(map.get("message")).ok_or(ChatRequestError::Missing("message"))?;
        let gpa = match map.get("gpa") {
            None | Some(Value::Null) => None,
            Some(v) => Some(numeric(v).ok_or(ChatRequestError::NotNumeric("gpa"))?),
        };

        Ok(Self {
            message,
            career: string_field(map.get("career")),
            gpa,
            subject_grades: map
                .get("subject_grades")
                .or_else(|| map.get("subjectGrades"))
                .filter(|v| !v.is_null())
                .cloned(),
            session_id: string_field(map.get("session_id").or_else(|| map.get("sessionId"))),
        })
    }
}

/// Chatbot university query
#[derive(Debug, Clone, PartialEq)]
pub struct UniversityQuery {
    pub gpa: f64,
    pub career: String,
}

impl UniversityQuery {
    pub fn from_json(raw: &Value) -> Result<Self, ChatRequestError> {
        let map = raw.as_object().ok_or(ChatRequestError::NotAnObject)?;

        let gpa = match map.get("gpa") {
            None | Some(Value::Null) => return Err(ChatRequestError::Missing("gpa")),
            Some(v) => numeric(v).ok_or(ChatRequestError::NotNumeric("gpa"))?,
        };
        let career = string_field(map.get("career")).ok_or(ChatRequestError::Missing("career"))?;

        Ok(Self { gpa, career })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendation {
    #[serde(default, alias = "recommendedUniversities")]
    pub recommended_universities: Vec<String>,
    #[serde(default, alias = "similarCareers")]
    pub similar_careers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedReply {
    #[serde(alias = "reply")]
    response: String,
}

pub struct ChatService {
    content: Arc<dyn ContentService>,
    timeout: Duration,
}

impl ChatService {
    pub fn new(content: Arc<dyn ContentService>, timeout: Duration) -> Self {
        Self { content, timeout }
    }

    /// Reply to a chat message; never fails
    pub async fn chat(&self, message: ChatMessage) -> (ChatReply, ContentSource) {
        let session_id = message
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let payload = json!({
            "message": message.message,
            "career": message.career,
            "gpa": message.gpa,
            "subjectGrades": message.subject_grades,
            "sessionId": session_id,
        });

        let generated = self
            .bounded(generate_as::<GeneratedReply>(
                self.content.as_ref(),
                ContentTopic::Chat,
                payload,
            ))
            .await
            .and_then(|reply| {
                let text = reply.response.trim().to_string();
                if text.is_empty() {
                    Err(ContentError::Parse("empty chat reply".to_string()))
                } else {
                    Ok(text)
                }
            });

        match generated {
            Ok(response) => (
                ChatReply {
                    response,
                    session_id,
                },
                ContentSource::Generated,
            ),
            Err(e) => {
                log_fallback(ContentTopic::Chat, &e);
                (
                    ChatReply {
                        response: canned_reply(message.career.as_deref()),
                        session_id,
                    },
                    ContentSource::Fallback,
                )
            }
        }
    }

    /// Recommend universities and similar careers; never fails
    pub async fn recommend(&self, query: &UniversityQuery) -> (UniversityRecommendation, ContentSource) {
        let generated = self
            .bounded(generate_as::<UniversityRecommendation>(
                self.content.as_ref(),
                ContentTopic::ChatbotRecommend,
                json!({ "gpa": query.gpa, "career": query.career }),
            ))
            .await;

        match generated {
            Ok(recommendation) => (recommendation, ContentSource::Generated),
            Err(e) => {
                log_fallback(ContentTopic::ChatbotRecommend, &e);
                (fallback_recommendation(&query.career), ContentSource::Fallback)
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, ContentError>>,
    ) -> Result<T, ContentError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(ContentError::Timeout))
    }
}

fn log_fallback(topic: ContentTopic, e: &ContentError) {
    match e {
        ContentError::NotConfigured => {
            tracing::debug!(topic = topic.path(), "Content service not configured, using fallback")
        }
        _ => warn!(topic = topic.path(), error = %e, "Content generation failed, using fallback"),
    }
}

fn canned_reply(career: Option<&str>) -> String {
    let base = "I'm having trouble reaching the career assistant right now. Please try again in a moment.";
    match career {
        Some(career) => format!(
            "{} In the meantime, the career details for {} are a good place to start.",
            base, career
        ),
        None => base.to_string(),
    }
}

/// Empty university list plus the closest catalog careers by skill overlap
pub fn fallback_recommendation(career: &str) -> UniversityRecommendation {
    UniversityRecommendation {
        recommended_universities: Vec::new(),
        similar_careers: skill_overlap_matches(career)
            .into_iter()
            .take(FALLBACK_SIMILAR_CAREERS)
            .map(|m| m.career)
            .collect(),
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DisabledContentService;
    use crate::enrichment::test_support::ScriptedContent;

    fn service(content: impl ContentService + 'static) -> ChatService {
        ChatService::new(Arc::new(content), Duration::from_secs(1))
    }

    #[test]
    fn test_chat_message_requires_message() {
        let err = ChatMessage::from_json(&json!({"career": "Doctor", "gpa": 3.5})).unwrap_err();
        assert_eq!(err.field(), Some("message"));

        let err = ChatMessage::from_json(&json!({"message": "   "})).unwrap_err();
        assert!(matches!(err, ChatRequestError::Missing("message")));
    }

    #[test]
    fn test_chat_message_context() {
        let msg = ChatMessage::from_json(&json!({
            "message": "Tell me about computer science",
            "career": "Software Engineer",
            "gpa": "3.5",
            "subject_grades": {"math": "A"},
            "session_id": "abc"
        }))
        .unwrap();

        assert_eq!(msg.gpa, Some(3.5));
        assert_eq!(msg.session_id.as_deref(), Some("abc"));
        assert_eq!(msg.subject_grades, Some(json!({"math": "A"})));
    }

    #[test]
    fn test_university_query_validation() {
        assert!(matches!(
            UniversityQuery::from_json(&json!({"career": "Doctor"})),
            Err(ChatRequestError::Missing("gpa"))
        ));
        assert!(matches!(
            UniversityQuery::from_json(&json!({"gpa": "high", "career": "Doctor"})),
            Err(ChatRequestError::NotNumeric("gpa"))
        ));
        assert!(matches!(
            UniversityQuery::from_json(&json!({"gpa": 3.8})),
            Err(ChatRequestError::Missing("career"))
        ));

        let query = UniversityQuery::from_json(&json!({"gpa": 3.8, "career": "Doctor"})).unwrap();
        assert_eq!(query.gpa, 3.8);
    }

    #[tokio::test]
    async fn test_chat_generated_keeps_session() {
        let content = ScriptedContent::default()
            .reply(ContentTopic::Chat, json!({"response": "Computer science is broad."}));
        let msg = ChatMessage::from_json(&json!({"message": "hi", "session_id": "s-1"})).unwrap();

        let (reply, source) = service(content).chat(msg).await;
        assert_eq!(reply.response, "Computer science is broad.");
        assert_eq!(reply.session_id, "s-1");
        assert_eq!(source, ContentSource::Generated);
    }

    #[tokio::test]
    async fn test_chat_fallback_generates_session() {
        let msg = ChatMessage::from_json(&json!({"message": "hi", "career": "Lawyer"})).unwrap();

        let (reply, source) = service(DisabledContentService).chat(msg).await;
        assert_eq!(source, ContentSource::Fallback);
        assert!(reply.response.contains("Lawyer"));
        assert!(Uuid::parse_str(&reply.session_id).is_ok());
    }

    #[tokio::test]
    async fn test_chat_timeout_falls_back() {
        let content = ScriptedContent::default()
            .reply(ContentTopic::Chat, json!({"response": "late"}))
            .delayed(Duration::from_secs(5));
        let chat = ChatService::new(Arc::new(content), Duration::from_millis(20));
        let msg = ChatMessage::from_json(&json!({"message": "hi"})).unwrap();

        let (_, source) = chat.chat(msg).await;
        assert_eq!(source, ContentSource::Fallback);
    }

    #[tokio::test]
    async fn test_recommend_generated() {
        let content = ScriptedContent::default().reply(
            ContentTopic::ChatbotRecommend,
            json!({
                "recommended_universities": ["University A", "University B"],
                "similar_careers": ["Career A", "Career B"]
            }),
        );
        let query = UniversityQuery {
            gpa: 3.8,
            career: "Computer Science".to_string(),
        };

        let (rec, source) = service(content).recommend(&query).await;
        assert_eq!(source, ContentSource::Generated);
        assert_eq!(rec.recommended_universities, vec!["University A", "University B"]);
        assert_eq!(rec.similar_careers, vec!["Career A", "Career B"]);
    }

    #[tokio::test]
    async fn test_recommend_fallback() {
        let query = UniversityQuery {
            gpa: 3.1,
            career: "Software Engineer".to_string(),
        };

        let (rec, source) = service(DisabledContentService).recommend(&query).await;
        assert_eq!(source, ContentSource::Fallback);
        assert!(rec.recommended_universities.is_empty());
        assert_eq!(rec.similar_careers.len(), FALLBACK_SIMILAR_CAREERS);
        assert_eq!(rec.similar_careers[0], "Data Scientist");
    }
}
