//! Academic profile schema and feature vector construction
//!
//! Every inference tier consumes the same fixed-order [`FeatureVector`]. This
//! module is the only place that decides what a valid profile looks like;
//! downstream code never re-validates.
//!
//! Coercion rules per field:
//! - JSON numbers pass through
//! - strings are trimmed and parsed as `f64`
//! - booleans map to `1.0` / `0.0`
//! - absent fields and `null` become `0.0`
//! - arrays, objects, empty strings and non-finite values are rejected
//!
//! Unknown fields are ignored.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Ordered feature fields. Reordering or renaming is a breaking change for
/// every trained artifact and remote model.
pub const FEATURE_FIELDS: [&str; 7] = [
    "math_score",
    "history_score",
    "physics_score",
    "chemistry_score",
    "biology_score",
    "english_score",
    "geography_score",
];

/// Number of features in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = FEATURE_FIELDS.len();

/// Feature schema violation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// Request body was not a JSON object
    #[error("academic profile must be a JSON object")]
    NotAnObject,

    /// Field present but not coercible to a number
    #[error("field '{field}' must be numeric, got {found}")]
    NotNumeric { field: String, found: String },

    /// Field coerced to NaN or infinity
    #[error("field '{field}' must be a finite number")]
    NonFinite { field: String },
}

impl ValidationError {
    /// Name of the offending field, if the error concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::NotNumeric { field, .. } | ValidationError::NonFinite { field } => {
                Some(field)
            }
        }
    }
}

/// Fixed-order numeric representation of an [`AcademicProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Validated academic profile
///
/// Immutable once constructed; built per request and dropped with it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AcademicProfile {
    values: [f64; FEATURE_COUNT],
}

impl AcademicProfile {
    /// Validate and normalize an arbitrary JSON value
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        match raw {
            Value::Object(map) => Self::from_map(map),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    /// Validate and normalize a JSON object
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, field) in values.iter_mut().zip(FEATURE_FIELDS) {
            if let Some(raw) = map.get(field) {
                *slot = coerce(field, raw)?;
            }
        }
        Ok(Self { values })
    }

    /// Score for a named field, `None` if the field is not part of the schema
    pub fn get(&self, field: &str) -> Option<f64> {
        FEATURE_FIELDS
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.values[idx])
    }

    /// Fixed-order feature vector for the inference tiers
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector(self.values)
    }

    /// Subjects ordered by descending score, ties keep schema order.
    /// Zero scores are treated as "not reported" and skipped.
    pub fn strongest_subjects(&self, limit: usize) -> Vec<&'static str> {
        let mut ranked: Vec<(usize, f64)> = self
            .values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| *v > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
            .into_iter()
            .take(limit)
            .map(|(idx, _)| subject_label(FEATURE_FIELDS[idx]))
            .collect()
    }
}

impl Serialize for AcademicProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (field, value) in FEATURE_FIELDS.iter().zip(self.values.iter()) {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Human-readable subject name for a feature field (`math_score` → `Math`)
pub fn subject_label(field: &str) -> &'static str {
    match field {
        "math_score" => "Math",
        "history_score" => "History",
        "physics_score" => "Physics",
        "chemistry_score" => "Chemistry",
        "biology_score" => "Biology",
        "english_score" => "English",
        "geography_score" => "Geography",
        _ => "General Studies",
    }
}

fn coerce(field: &str, raw: &Value) -> Result<f64, ValidationError> {
    let value = match raw {
        Value::Null => return Ok(0.0),
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Array(_) | Value::Object(_) => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(ValidationError::NonFinite {
            field: field.to_string(),
        }),
        None => Err(ValidationError::NotNumeric {
            field: field.to_string(),
            found: describe(raw),
        }),
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
        other => other.to_string(),
    }
}
