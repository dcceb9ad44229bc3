//! Alternative career matching
//!
//! Candidates are the catalog minus the target career. The content service
//! scores each candidate concurrently; candidates it fails on are dropped.
//! When nothing usable comes back the local skill-overlap matcher scores the
//! whole candidate set instead.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use career_common::catalog::{canonical_career, other_careers};
use career_common::{AlternativeCareerMatch, ContentSource};
use futures::future::join_all;
use serde_json::json;
use tracing::debug;

use super::{knowledge, EnrichmentError, EnrichmentKind, EnrichmentProvider, Enriched};
use crate::content::{generate_as, ContentError, ContentService, ContentTopic};

/// Maximum number of alternatives returned
pub const TOP_N: usize = 5;

#[derive(Debug, Clone)]
pub struct AlternativesRequest {
    pub career: String,
}

pub struct AlternativeCareersProvider {
    content: Arc<dyn ContentService>,
}

impl AlternativeCareersProvider {
    pub fn new(content: Arc<dyn ContentService>) -> Self {
        Self { content }
    }

    async fn score_candidate(
        &self,
        target: &str,
        candidate: &'static str,
    ) -> Result<AlternativeCareerMatch, EnrichmentError> {
        let mut scored: AlternativeCareerMatch = generate_as(
            self.content.as_ref(),
            ContentTopic::CareerMatch,
            json!({ "career": target, "candidate": candidate }),
        )
        .await?;

        // The candidate name is ours, not the collaborator's
        scored.career = candidate.to_string();
        if !scored.is_well_formed() {
            return Err(EnrichmentError::Malformed(format!(
                "invalid score for {}",
                candidate
            )));
        }
        Ok(scored)
    }
}

#[async_trait]
impl EnrichmentProvider for AlternativeCareersProvider {
    type Request = AlternativesRequest;
    type Output = Vec<AlternativeCareerMatch>;

    fn kind(&self) -> EnrichmentKind {
        EnrichmentKind::AlternativeCareers
    }

    async fn fetch(
        &self,
        request: &AlternativesRequest,
    ) -> Result<Enriched<Vec<AlternativeCareerMatch>>, EnrichmentError> {
        if !self.content.is_configured() {
            return Err(ContentError::NotConfigured.into());
        }

        let target = canonical_career(&request.career).unwrap_or(request.career.trim());
        let attempts = join_all(
            other_careers(target).map(|candidate| self.score_candidate(target, candidate)),
        )
        .await;

        let total = attempts.len();
        let matches: Vec<AlternativeCareerMatch> = attempts
            .into_iter()
            .filter_map(|attempt| match attempt {
                Ok(m) => Some(m),
                Err(e) => {
                    debug!(error = %e, "Dropping unscored candidate");
                    None
                }
            })
            .collect();

        debug!(scored = matches.len(), total, "Candidate scoring finished");
        if matches.is_empty() {
            return Err(EnrichmentError::NoResults);
        }
        Ok(Enriched::new(rank(matches), ContentSource::Generated))
    }

    fn fallback(&self, request: &AlternativesRequest) -> Vec<AlternativeCareerMatch> {
        skill_overlap_matches(&request.career)
    }
}

/// Sort by descending score (name breaks ties) and keep the top entries
pub fn rank(mut matches: Vec<AlternativeCareerMatch>) -> Vec<AlternativeCareerMatch> {
    matches.sort_by(|a, b| {
        b.matching_score
            .partial_cmp(&a.matching_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.career.cmp(&b.career))
    });
    matches.truncate(TOP_N);
    matches
}

/// Score every catalog candidate by Jaccard overlap of core skills
pub fn skill_overlap_matches(career: &str) -> Vec<AlternativeCareerMatch> {
    let target = canonical_career(career).unwrap_or(career.trim());
    let target_skills = knowledge::skills_for(target)
        .unwrap_or_else(|| knowledge::generic_profile(target).skills);

    let matches = other_careers(target)
        .map(|candidate| {
            let candidate_skills = knowledge::skills_for(candidate).unwrap_or_default();
            let shared: BTreeSet<String> = target_skills
                .intersection(&candidate_skills)
                .cloned()
                .collect();
            let union = target_skills.union(&candidate_skills).count();
            let score = if union == 0 {
                0.0
            } else {
                (shared.len() as f64 / union as f64 * 1000.0).round() / 10.0
            };

            let explanation = if shared.is_empty() {
                format!("{} draws on a different skill set", candidate)
            } else {
                format!(
                    "Shares {} core skill(s) with {}: {}",
                    shared.len(),
                    target,
                    shared.iter().cloned().collect::<Vec<_>>().join(", ")
                )
            };

            AlternativeCareerMatch {
                career: candidate.to_string(),
                matching_score: score,
                explanation,
                key_skills: if shared.is_empty() { candidate_skills } else { shared },
            }
        })
        .collect();

    rank(matches)
}
