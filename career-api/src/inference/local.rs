//! Local inference tier
//!
//! Wraps the in-process classifier. The scaler, model and label decoder are
//! loaded independently at startup, at most once per process; if any of the
//! three fails the tier reports itself unavailable for the process lifetime.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use career_common::{FeatureVector, SourceTier};
use tracing::{info, warn};

use super::artifacts::{self, ArtifactError, LabelDecoder, ModelArtifact, StandardScaler};
use super::{AdapterError, InferenceAdapter};

/// Fully loaded classifier: scaler → model → label decoder
#[derive(Debug, Clone)]
pub struct LocalModel {
    scaler: StandardScaler,
    model: ModelArtifact,
    labels: LabelDecoder,
}

impl LocalModel {
    pub fn new(scaler: StandardScaler, model: ModelArtifact, labels: LabelDecoder) -> Self {
        Self {
            scaler,
            model,
            labels,
        }
    }

    /// Scale, classify, decode
    pub fn predict_label(&self, vector: &FeatureVector) -> Result<String, ArtifactError> {
        let scaled = self.scaler.transform(vector)?;
        let class = self.model.predict(&scaled)?;
        self.labels.decode(class).map(str::to_string)
    }

    /// Probability per career label, highest first
    pub fn class_probabilities(
        &self,
        vector: &FeatureVector,
    ) -> Result<Vec<(String, f64)>, ArtifactError> {
        let scaled = self.scaler.transform(vector)?;
        let proba = self.model.predict_proba(&scaled)?;

        let mut labelled = proba
            .into_iter()
            .enumerate()
            .map(|(idx, p)| self.labels.decode(idx).map(|label| (label.to_string(), p)))
            .collect::<Result<Vec<_>, _>>()?;
        labelled.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(labelled)
    }
}

/// Local tier adapter
#[derive(Debug)]
pub struct LocalInferenceAdapter {
    model: Option<Arc<LocalModel>>,
    unavailable_reason: Option<String>,
}

impl LocalInferenceAdapter {
    /// Attempt the three artifact loads. Never fails; a missing piece makes
    /// the adapter unavailable.
    pub fn load(model_dir: Option<&Path>) -> Self {
        let Some(dir) = model_dir else {
            info!("No model directory configured, local inference disabled");
            return Self::unavailable("no model directory configured");
        };

        let scaler = log_load("scaler", artifacts::load_scaler(dir));
        let model = log_load("model", artifacts::load_model(dir));
        let labels = log_load("label encoder", artifacts::load_label_decoder(dir));

        match (scaler, model, labels) {
            (Some(scaler), Some(model), Some(labels)) => {
                if model.n_classes() != labels.classes.len() {
                    warn!(
                        model_classes = model.n_classes(),
                        label_classes = labels.classes.len(),
                        "Model and label encoder disagree on class count"
                    );
                }
                info!(
                    dir = %dir.display(),
                    classes = labels.classes.len(),
                    "Local model loaded"
                );
                Self::from_model(LocalModel::new(scaler, model, labels))
            }
            _ => {
                warn!(dir = %dir.display(), "Local inference unavailable: artifact load failed");
                Self::unavailable("model artifacts failed to load")
            }
        }
    }

    pub fn from_model(model: LocalModel) -> Self {
        Self {
            model: Some(Arc::new(model)),
            unavailable_reason: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: None,
            unavailable_reason: Some(reason.into()),
        }
    }
}

#[async_trait]
impl InferenceAdapter for LocalInferenceAdapter {
    fn tier(&self) -> SourceTier {
        SourceTier::Local
    }

    fn is_available(&self) -> bool {
        self.model.is_some()
    }

    async fn predict(&self, vector: &FeatureVector) -> Result<String, AdapterError> {
        let Some(model) = &self.model else {
            return Err(AdapterError::Unavailable {
                tier: SourceTier::Local,
                reason: self
                    .unavailable_reason
                    .clone()
                    .unwrap_or_else(|| "model not loaded".to_string()),
            });
        };

        model.predict_label(vector).map_err(|e| AdapterError::Failed {
            tier: SourceTier::Local,
            reason: e.to_string(),
        })
    }
}

fn log_load<T>(artifact: &str, result: Result<T, ArtifactError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(artifact, error = %e, "Failed to load model artifact");
            None
        }
    }
}
