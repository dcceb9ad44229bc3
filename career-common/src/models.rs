//! Caller-facing payload types
//!
//! Field names serialize in camelCase. Deserialization also accepts the
//! snake_case spellings the generative collaborator tends to emit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which tier produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTier {
    /// In-process classifier artifact
    Local,
    /// Remote HTTP inference service
    Remote,
    /// Uniform draw from the static career catalog
    Fallback,
}

impl SourceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTier::Local => "Local",
            SourceTier::Remote => "Remote",
            SourceTier::Fallback => "Fallback",
        }
    }
}

/// Outcome of the prediction pipeline. Created once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub career: String,
    pub source_tier: SourceTier,
    /// Explains degradation; absent when the preferred tier answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PredictionResult {
    pub fn new(career: impl Into<String>, source_tier: SourceTier) -> Self {
        Self {
            career: career.into(),
            source_tier,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.source_tier == SourceTier::Fallback || self.note.is_some()
    }
}

/// Where an enrichment record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Curated knowledge table
    Static,
    /// Generative collaborator
    Generated,
    /// Generic canned content after a failure
    Fallback,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Static => "static",
            ContentSource::Generated => "generated",
            ContentSource::Fallback => "fallback",
        }
    }
}

/// Work-life balance rating on a 1-10 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLifeBalance {
    pub rating: f64,
    pub explanation: String,
}

/// Detailed career profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    pub description: String,
    #[serde(alias = "required_skills", alias = "requiredSkills")]
    pub skills: BTreeSet<String>,
    #[serde(alias = "salary_range")]
    pub salary_range: String,
    pub education: String,
    /// Difficulty on a 1-10 scale
    pub difficulty: f64,
    #[serde(alias = "job_outlook")]
    pub job_outlook: String,
    #[serde(alias = "day_to_day")]
    pub day_to_day: String,
    pub advancement: String,
    #[serde(alias = "work_life_balance")]
    pub work_life_balance: WorkLifeBalance,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl CareerProfile {
    /// Structural checks applied to collaborator output before it is served
    pub fn is_well_formed(&self) -> bool {
        !self.description.trim().is_empty()
            && !self.education.trim().is_empty()
            && !self.skills.is_empty()
            && !self.pros.is_empty()
            && !self.cons.is_empty()
            && (0.0..=10.0).contains(&self.difficulty)
            && (0.0..=10.0).contains(&self.work_life_balance.rating)
    }
}

/// Career development roadmap
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerRoadmap {
    #[serde(alias = "short_term_goals")]
    pub short_term_goals: Vec<String>,
    #[serde(alias = "mid_term_goals")]
    pub mid_term_goals: Vec<String>,
    #[serde(alias = "long_term_goals")]
    pub long_term_goals: Vec<String>,
    #[serde(alias = "education_requirements")]
    pub education_requirements: Vec<String>,
    #[serde(alias = "skills_to_develop")]
    pub skills_to_develop: Vec<String>,
    #[serde(alias = "experience_needed")]
    pub experience_needed: Vec<String>,
    pub certifications: Vec<String>,
    #[serde(alias = "personal_development")]
    pub personal_development: Vec<String>,
    #[serde(alias = "networking_suggestions")]
    pub networking_suggestions: Vec<String>,
    pub milestones: Vec<String>,
}

impl CareerRoadmap {
    /// A roadmap must at least carry goals at every horizon
    pub fn is_well_formed(&self) -> bool {
        !self.short_term_goals.is_empty()
            && !self.mid_term_goals.is_empty()
            && !self.long_term_goals.is_empty()
    }
}

/// One scored alternative career
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeCareerMatch {
    pub career: String,
    /// Similarity score, 0-100
    #[serde(alias = "matching_score")]
    pub matching_score: f64,
    pub explanation: String,
    #[serde(alias = "key_skills", default)]
    pub key_skills: BTreeSet<String>,
}

impl AlternativeCareerMatch {
    pub fn is_well_formed(&self) -> bool {
        !self.career.trim().is_empty()
            && self.matching_score.is_finite()
            && (0.0..=100.0).contains(&self.matching_score)
    }
}

/// Structured summary of an educational institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionSummary {
    pub name: String,
    pub overview: String,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(alias = "admission_requirements", default)]
    pub admission_requirements: Vec<String>,
    #[serde(alias = "campus_life", default)]
    pub campus_life: String,
    #[serde(alias = "notable_facts", default)]
    pub notable_facts: Vec<String>,
}

impl InstitutionSummary {
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && !self.overview.trim().is_empty()
    }
}
