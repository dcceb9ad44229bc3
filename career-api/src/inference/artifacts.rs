//! Classifier artifacts for the local inference tier
//!
//! Three independent JSON files, each loaded and validated on its own:
//! - `scaler.json`: standard scaler parameters (`mean`, `scale`)
//! - `model.json`: classifier, tagged by `kind` (`linear` or `nearest_centroid`)
//! - `label_encoder.json`: class index → career label

use std::path::{Path, PathBuf};

use career_common::{FeatureVector, FEATURE_COUNT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "model.json";
pub const LABELS_FILE: &str = "label_encoder.json";

/// Artifact load or evaluation error
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact file does not exist
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),

    /// Artifact file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact JSON did not match the expected structure
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Artifact parsed but its contents are unusable
    #[error("Invalid {artifact}: {message}")]
    Invalid {
        artifact: &'static str,
        message: String,
    },

    /// Vector length does not match the artifact
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Model produced a class the label decoder does not know
    #[error("Class index {index} outside label decoder range ({classes} classes)")]
    UnknownClass { index: usize, classes: usize },
}

/// Standard scaler: `(x - mean) / scale` per feature
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        check_row("scaler", "mean", &self.mean)?;
        check_row("scaler", "scale", &self.scale)
    }

    /// Scale a feature vector. A zero scale leaves the centered value as is.
    pub fn transform(&self, vector: &FeatureVector) -> Result<Vec<f64>, ArtifactError> {
        let x = vector.as_slice();
        if self.mean.len() != x.len() || self.scale.len() != x.len() {
            return Err(ArtifactError::DimensionMismatch {
                expected: self.mean.len(),
                actual: x.len(),
            });
        }

        Ok(x.iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| {
                let s = if *s == 0.0 { 1.0 } else { *s };
                (v - m) / s
            })
            .collect())
    }
}

/// Classifier over scaled feature vectors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// One linear score per class: `w_c · x + b_c`
    Linear {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    /// Nearest centroid by Euclidean distance
    NearestCentroid { centroids: Vec<Vec<f64>> },
}

impl ModelArtifact {
    pub fn n_classes(&self) -> usize {
        match self {
            ModelArtifact::Linear { coefficients, .. } => coefficients.len(),
            ModelArtifact::NearestCentroid { centroids } => centroids.len(),
        }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_classes() == 0 {
            return Err(ArtifactError::Invalid {
                artifact: "model",
                message: "no classes".to_string(),
            });
        }

        match self {
            ModelArtifact::Linear {
                coefficients,
                intercepts,
            } => {
                if intercepts.len() != coefficients.len() {
                    return Err(ArtifactError::Invalid {
                        artifact: "model",
                        message: format!(
                            "{} intercepts for {} classes",
                            intercepts.len(),
                            coefficients.len()
                        ),
                    });
                }
                if intercepts.iter().any(|b| !b.is_finite()) {
                    return Err(ArtifactError::Invalid {
                        artifact: "model",
                        message: "non-finite intercept".to_string(),
                    });
                }
                coefficients
                    .iter()
                    .try_for_each(|row| check_row("model", "coefficients", row))
            }
            ModelArtifact::NearestCentroid { centroids } => centroids
                .iter()
                .try_for_each(|row| check_row("model", "centroids", row)),
        }
    }

    /// Raw per-class scores, higher is better
    pub fn decision_scores(&self, x: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if x.len() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: x.len(),
            });
        }

        Ok(match self {
            ModelArtifact::Linear {
                coefficients,
                intercepts,
            } => coefficients
                .iter()
                .zip(intercepts)
                .map(|(w, b)| dot(w, x) + b)
                .collect(),
            ModelArtifact::NearestCentroid { centroids } => centroids
                .iter()
                .map(|c| -squared_distance(c, x))
                .collect(),
        })
    }

    /// Index of the winning class
    pub fn predict(&self, x: &[f64]) -> Result<usize, ArtifactError> {
        let scores = self.decision_scores(x)?;
        argmax(&scores).ok_or_else(|| ArtifactError::Invalid {
            artifact: "model",
            message: "no finite class score".to_string(),
        })
    }

    /// Softmax over the decision scores
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        let scores = self.decision_scores(x)?;
        Ok(softmax(&scores))
    }
}

/// Class index → career label
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelDecoder {
    pub classes: Vec<String>,
}

impl LabelDecoder {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid {
                artifact: "label encoder",
                message: "no classes".to_string(),
            });
        }
        if self.classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ArtifactError::Invalid {
                artifact: "label encoder",
                message: "blank class label".to_string(),
            });
        }
        Ok(())
    }

    pub fn decode(&self, index: usize) -> Result<&str, ArtifactError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ArtifactError::UnknownClass {
                index,
                classes: self.classes.len(),
            })
    }
}

pub fn load_scaler(dir: &Path) -> Result<StandardScaler, ArtifactError> {
    let scaler: StandardScaler = load_json(&dir.join(SCALER_FILE))?;
    scaler.validate()?;
    Ok(scaler)
}

pub fn load_model(dir: &Path) -> Result<ModelArtifact, ArtifactError> {
    let model: ModelArtifact = load_json(&dir.join(MODEL_FILE))?;
    model.validate()?;
    Ok(model)
}

pub fn load_label_decoder(dir: &Path) -> Result<LabelDecoder, ArtifactError> {
    let labels: LabelDecoder = load_json(&dir.join(LABELS_FILE))?;
    labels.validate()?;
    Ok(labels)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn check_row(artifact: &'static str, name: &str, row: &[f64]) -> Result<(), ArtifactError> {
    if row.len() != FEATURE_COUNT {
        return Err(ArtifactError::Invalid {
            artifact,
            message: format!("{} has {} values, expected {}", name, row.len(), FEATURE_COUNT),
        });
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::Invalid {
            artifact,
            message: format!("{} contains non-finite values", name),
        });
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn argmax(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (idx, &s)| match best {
            Some((_, b)) if b >= s => best,
            _ => Some((idx, s)),
        })
        .map(|(idx, _)| idx)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return vec![0.0; scores.len()];
    }
    let exps: Vec<f64> = scores
        .iter()
        .map(|s| if s.is_finite() { (s - max).exp() } else { 0.0 })
        .collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_row(hot: usize) -> Vec<f64> {
        let mut row = vec![0.0; FEATURE_COUNT];
        row[hot] = 1.0;
        row
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = StandardScaler {
            mean: vec![50.0; FEATURE_COUNT],
            scale: vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 0.0],
        };
        let vector = FeatureVector::new([60.0, 40.0, 50.0, 50.0, 50.0, 50.0, 55.0]);
        let scaled = scaler.transform(&vector).unwrap();

        assert_eq!(scaled[0], 1.0);
        assert_eq!(scaled[1], -1.0);
        assert_eq!(scaled[2], 0.0);
        // Zero scale only centers
        assert_eq!(scaled[6], 5.0);
    }

    #[test]
    fn test_scaler_rejects_wrong_width() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        assert!(matches!(
            scaler.validate(),
            Err(ArtifactError::Invalid { artifact: "scaler", .. })
        ));
        assert!(matches!(
            scaler.transform(&FeatureVector::default()),
            Err(ArtifactError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_linear_model_predicts_argmax() {
        let model = ModelArtifact::Linear {
            coefficients: vec![unit_row(0), unit_row(2)],
            intercepts: vec![0.0, 0.1],
        };
        model.validate().unwrap();

        let math_heavy = [2.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(model.predict(&math_heavy).unwrap(), 0);

        let physics_heavy = [0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(model.predict(&physics_heavy).unwrap(), 1);
    }

    #[test]
    fn test_nearest_centroid_model() {
        let model = ModelArtifact::NearestCentroid {
            centroids: vec![unit_row(0), unit_row(4)],
        };
        model.validate().unwrap();

        let x = [0.1, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0];
        assert_eq!(model.predict(&x).unwrap(), 1);
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let model = ModelArtifact::Linear {
            coefficients: vec![unit_row(0), unit_row(1), unit_row(2)],
            intercepts: vec![0.0, 0.0, 0.0],
        };
        let proba = model
            .predict_proba(&[3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();

        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba[0] > proba[1] && proba[1] > proba[2]);
    }

    #[test]
    fn test_model_validation_catches_intercept_mismatch() {
        let model = ModelArtifact::Linear {
            coefficients: vec![unit_row(0), unit_row(1)],
            intercepts: vec![0.0],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_model_json_tagging() {
        let model: ModelArtifact = serde_json::from_str(
            r#"{"kind": "nearest_centroid", "centroids": [[0,0,0,0,0,0,0]]}"#,
        )
        .unwrap();
        assert_eq!(model.n_classes(), 1);
    }

    #[test]
    fn test_label_decoder() {
        let labels = LabelDecoder {
            classes: vec!["Doctor".to_string(), "Teacher".to_string()],
        };
        labels.validate().unwrap();

        assert_eq!(labels.decode(1).unwrap(), "Teacher");
        assert!(matches!(
            labels.decode(5),
            Err(ArtifactError::UnknownClass { index: 5, classes: 2 })
        ));
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_scaler(dir.path()),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LABELS_FILE), "{\"classes\": 7}").unwrap();
        assert!(matches!(
            load_label_decoder(dir.path()),
            Err(ArtifactError::Parse { .. })
        ));
    }
}
