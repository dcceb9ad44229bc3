//! HTTP client for the generative content service
//!
//! Rate limited client side with `governor`; every request is bounded by the
//! configured timeout. Outcomes refresh the content reachability flag.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use serde_json::Value;
use tracing::debug;

use super::{ContentError, ContentService, ContentTopic};
use crate::degradation::DegradationState;

const USER_AGENT: &str = concat!("career-api/", env!("CARGO_PKG_VERSION"));

type DirectRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Connection settings for the content service
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub requests_per_second: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_millis(career_common::config::DEFAULT_CONTENT_TIMEOUT_MS),
            requests_per_second: career_common::config::DEFAULT_CONTENT_RPS,
        }
    }
}

pub struct HttpContentService {
    http_client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
    rate_limiter: DirectRateLimiter,
    degradation: Arc<DegradationState>,
}

impl HttpContentService {
    pub fn new(config: ContentConfig, degradation: Arc<DegradationState>) -> Result<Self, ContentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ContentError::Network(e.to_string()))?;

        // 0 in the config means "as low as possible", not "unlimited"
        let rps = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rps));

        Ok(Self {
            http_client,
            base_url: config
                .base_url
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: config.api_key,
            rate_limiter,
            degradation,
        })
    }

    async fn send(&self, base_url: &str, topic: ContentTopic, payload: &Value) -> Result<Value, ContentError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/{}", base_url, topic.path());
        debug!(url = %url, "Requesting generated content");

        let mut request = self.http_client.post(&url).json(payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status(status.as_u16(), truncate(&body, 200)));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ContentError::Timeout
            } else {
                ContentError::Parse(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn generate(&self, topic: ContentTopic, payload: Value) -> Result<Value, ContentError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(ContentError::NotConfigured);
        };

        let result = self.send(base_url, topic, &payload).await;
        // A well-formed error status still proves the service is reachable
        let reachable = matches!(result, Ok(_) | Err(ContentError::Status(..)) | Err(ContentError::Parse(_)));
        self.degradation.mark_content(reachable);
        result
    }
}

fn map_transport(e: reqwest::Error) -> ContentError {
    if e.is_timeout() {
        ContentError::Timeout
    } else {
        ContentError::Network(e.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
