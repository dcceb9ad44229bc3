//! Remote inference tier
//!
//! POSTs the feature vector to an external prediction service.
//!
//! Request: `{"features": [..], "feature_names": [..]}`
//! Response: `{"career": "..."}` (legacy services answer `predicted_career`,
//! some send both)
//!
//! Every failure mode (connect error, non-2xx, timeout, unparseable body,
//! missing label) becomes an [`AdapterError`]; nothing propagates further.
//! Each call refreshes the remote reachability flag.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use career_common::{FeatureVector, SourceTier, FEATURE_FIELDS};
use serde::{Deserialize, Serialize};

use super::{AdapterError, InferenceAdapter};
use crate::degradation::DegradationState;

const USER_AGENT: &str = concat!("career-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct RemotePredictRequest<'a> {
    features: &'a FeatureVector,
    feature_names: &'a [&'static str],
}

#[derive(Debug, Deserialize)]
struct RemotePredictResponse {
    career: Option<String>,
    predicted_career: Option<String>,
}

impl RemotePredictResponse {
    /// Non-blank label, preferring `career` over the legacy key
    fn label(self) -> Option<String> {
        [self.career, self.predicted_career]
            .into_iter()
            .flatten()
            .map(|c| c.trim().to_string())
            .find(|c| !c.is_empty())
    }
}

/// HTTP client for the remote prediction service
pub struct RemoteInferenceClient {
    http_client: reqwest::Client,
    endpoint: Option<String>,
    timeout: Duration,
    degradation: Arc<DegradationState>,
}

impl RemoteInferenceClient {
    /// Create a client. `endpoint == None` yields a permanently unavailable tier.
    pub fn new(
        endpoint: Option<String>,
        timeout: Duration,
        degradation: Arc<DegradationState>,
    ) -> Result<Self, AdapterError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Unavailable {
                tier: SourceTier::Remote,
                reason: format!("HTTP client construction failed: {}", e),
            })?;

        Ok(Self {
            http_client,
            endpoint,
            timeout,
            degradation,
        })
    }

    async fn call(&self, endpoint: &str, vector: &FeatureVector) -> Result<String, AdapterError> {
        let body = RemotePredictRequest {
            features: vector,
            feature_names: &FEATURE_FIELDS,
        };

        tracing::debug!(endpoint, "Querying remote inference service");

        let response = self
            .http_client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("service returned status {}", status)));
        }

        let parsed: RemotePredictResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        parsed
            .label()
            .ok_or_else(|| failed("response missing career label".to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> AdapterError {
        if e.is_timeout() {
            AdapterError::Timeout {
                tier: SourceTier::Remote,
                after: self.timeout,
            }
        } else if e.is_decode() {
            failed(format!("unparseable response: {}", e))
        } else {
            failed(format!("request failed: {}", e))
        }
    }
}

#[async_trait]
impl InferenceAdapter for RemoteInferenceClient {
    fn tier(&self) -> SourceTier {
        SourceTier::Remote
    }

    fn is_available(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn predict(&self, vector: &FeatureVector) -> Result<String, AdapterError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err(AdapterError::Unavailable {
                tier: SourceTier::Remote,
                reason: "no remote endpoint configured".to_string(),
            });
        };

        let result = self.call(endpoint, vector).await;
        self.degradation.mark_remote(result.is_ok());

        if let Ok(label) = &result {
            tracing::debug!(career = %label, "Remote inference succeeded");
        }
        result
    }
}

fn failed(reason: String) -> AdapterError {
    AdapterError::Failed {
        tier: SourceTier::Remote,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let degradation = Arc::new(DegradationState::new(false, false, false));
        let client = RemoteInferenceClient::new(None, Duration::from_secs(1), degradation);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_no_endpoint_is_unavailable() {
        let degradation = Arc::new(DegradationState::new(false, false, false));
        let client =
            RemoteInferenceClient::new(None, Duration::from_secs(1), degradation.clone()).unwrap();

        let err = client.predict(&FeatureVector::default()).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(!client.is_available());
        // Unavailable tiers are never called, so reachability stays untouched
        assert!(degradation.snapshot().last_remote_check.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let vector = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let body = RemotePredictRequest {
            features: &vector,
            feature_names: &FEATURE_FIELDS,
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["features"][6], 7.0);
        assert_eq!(value["feature_names"][0], "math_score");
    }

    #[test]
    fn test_response_accepts_legacy_key() {
        let parsed: RemotePredictResponse =
            serde_json::from_str(r#"{"predicted_career": "Software Engineer"}"#).unwrap();
        assert_eq!(parsed.label().as_deref(), Some("Software Engineer"));

        let parsed: RemotePredictResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(parsed.label(), None);
    }

    #[test]
    fn test_response_with_both_keys() {
        let parsed: RemotePredictResponse =
            serde_json::from_str(r#"{"career": "Teacher", "predicted_career": "Teacher"}"#).unwrap();
        assert_eq!(parsed.label().as_deref(), Some("Teacher"));

        let parsed: RemotePredictResponse =
            serde_json::from_str(r#"{"career": "  ", "predicted_career": "Lawyer"}"#).unwrap();
        assert_eq!(parsed.label().as_deref(), Some("Lawyer"));
    }
}
