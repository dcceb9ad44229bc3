//! Prediction tiers
//!
//! Each tier wraps one prediction source behind [`InferenceAdapter`]. The
//! orchestrator walks them in priority order; the static fallback sits
//! outside the trait because it cannot fail.

pub mod artifacts;
pub mod fallback;
pub mod local;
pub mod remote;

pub use fallback::StaticFallback;
pub use local::{LocalInferenceAdapter, LocalModel};
pub use remote::RemoteInferenceClient;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use career_common::{FeatureVector, SourceTier};
use thiserror::Error;

use crate::degradation::DegradationState;

/// Why a tier did not produce a label
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Required resources (artifact, endpoint) are not ready; skip the tier
    #[error("{} tier unavailable: {}", .tier.as_str(), .reason)]
    Unavailable { tier: SourceTier, reason: String },

    /// Tier was attempted and failed
    #[error("{} tier failed: {}", .tier.as_str(), .reason)]
    Failed { tier: SourceTier, reason: String },

    /// Tier was attempted and did not answer in time
    #[error("{} tier timed out after {}ms", .tier.as_str(), .after.as_millis())]
    Timeout { tier: SourceTier, after: Duration },
}

impl AdapterError {
    pub fn tier(&self) -> SourceTier {
        match self {
            AdapterError::Unavailable { tier, .. }
            | AdapterError::Failed { tier, .. }
            | AdapterError::Timeout { tier, .. } => *tier,
        }
    }

    /// Caller-safe description, free of internal detail
    pub fn summary(&self) -> &'static str {
        match self {
            AdapterError::Unavailable { .. } => "unavailable",
            AdapterError::Failed { .. } => "failed",
            AdapterError::Timeout { .. } => "timed out",
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, AdapterError::Unavailable { .. })
    }
}

/// One prediction source behind a uniform contract
///
/// Adapters receive an already-validated vector and never re-validate it.
#[async_trait]
pub trait InferenceAdapter: Send + Sync {
    /// Tier reported in the prediction result
    fn tier(&self) -> SourceTier;

    /// Whether the tier's resources are ready. Unavailable tiers are skipped
    /// without being called.
    fn is_available(&self) -> bool {
        true
    }

    /// Predict a career label
    async fn predict(&self, vector: &FeatureVector) -> Result<String, AdapterError>;
}

/// Settings needed to build the inference tiers
#[derive(Debug, Clone, Default)]
pub struct InferenceConfig {
    pub model_dir: Option<PathBuf>,
    pub remote_url: Option<String>,
    pub remote_timeout: Duration,
}

/// Immutable handles to the prediction tiers, built once at startup
pub struct InferenceContext {
    pub local: Arc<LocalInferenceAdapter>,
    pub remote: Arc<RemoteInferenceClient>,
    pub degradation: Arc<DegradationState>,
}

impl InferenceContext {
    /// Load local artifacts (once) and prepare the remote client
    pub fn initialize(
        config: &InferenceConfig,
        content_configured: bool,
    ) -> Result<Self, AdapterError> {
        let local = LocalInferenceAdapter::load(config.model_dir.as_deref());
        let degradation = Arc::new(DegradationState::new(
            local.is_available(),
            config.remote_url.is_some(),
            content_configured,
        ));
        let remote = RemoteInferenceClient::new(
            config.remote_url.clone(),
            config.remote_timeout,
            Arc::clone(&degradation),
        )?;

        Ok(Self {
            local: Arc::new(local),
            remote: Arc::new(remote),
            degradation,
        })
    }
}
