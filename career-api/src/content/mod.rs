//! Generative content collaborator
//!
//! The remote content service answers `POST {base_url}/{topic}` with a JSON
//! record for the requested topic. Providers in `enrichment` and the chat
//! handlers are its only callers.

pub mod http_client;

pub use http_client::HttpContentService;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Content service errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content service not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Topic path segment on the content service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTopic {
    CareerDetail,
    CareerRoadmap,
    CareerMatch,
    InstitutionSummary,
    Chat,
    ChatbotRecommend,
}

impl ContentTopic {
    pub fn path(&self) -> &'static str {
        match self {
            ContentTopic::CareerDetail => "career-detail",
            ContentTopic::CareerRoadmap => "career-roadmap",
            ContentTopic::CareerMatch => "career-match",
            ContentTopic::InstitutionSummary => "institution-summary",
            ContentTopic::Chat => "chat",
            ContentTopic::ChatbotRecommend => "chatbot-recommend",
        }
    }
}

impl std::fmt::Display for ContentTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Generative collaborator
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Whether an endpoint is configured at all
    fn is_configured(&self) -> bool;

    /// Request content for `topic`. The payload shape is topic specific.
    async fn generate(&self, topic: ContentTopic, payload: Value) -> Result<Value, ContentError>;
}

/// Call the service and decode the answer into `T`
pub async fn generate_as<T: DeserializeOwned>(
    service: &dyn ContentService,
    topic: ContentTopic,
    payload: Value,
) -> Result<T, ContentError> {
    let raw = service.generate(topic, payload).await?;
    serde_json::from_value(raw).map_err(|e| ContentError::Parse(e.to_string()))
}

/// Content service that is never configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledContentService;

#[async_trait]
impl ContentService for DisabledContentService {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _topic: ContentTopic, _payload: Value) -> Result<Value, ContentError> {
        Err(ContentError::NotConfigured)
    }
}
