//! Career roadmap provider
//!
//! Generated by the content service; the fallback is a template built from
//! the career name and, when known, the student's strongest subjects.

use std::sync::Arc;

use async_trait::async_trait;
use career_common::{AcademicProfile, CareerRoadmap, ContentSource};
use serde_json::json;

use super::{EnrichmentError, EnrichmentKind, EnrichmentProvider, Enriched};
use crate::content::{generate_as, ContentService, ContentTopic};

#[derive(Debug, Clone)]
pub struct RoadmapRequest {
    pub career: String,
    pub profile: Option<AcademicProfile>,
}

pub struct CareerRoadmapProvider {
    content: Arc<dyn ContentService>,
}

impl CareerRoadmapProvider {
    pub fn new(content: Arc<dyn ContentService>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl EnrichmentProvider for CareerRoadmapProvider {
    type Request = RoadmapRequest;
    type Output = CareerRoadmap;

    fn kind(&self) -> EnrichmentKind {
        EnrichmentKind::CareerRoadmap
    }

    async fn fetch(&self, request: &RoadmapRequest) -> Result<Enriched<CareerRoadmap>, EnrichmentError> {
        let roadmap: CareerRoadmap = generate_as(
            self.content.as_ref(),
            ContentTopic::CareerRoadmap,
            json!({
                "career": request.career,
                "academicProfile": request.profile,
            }),
        )
        .await?;

        if !roadmap.is_well_formed() {
            return Err(EnrichmentError::Malformed("roadmap missing goals".to_string()));
        }
        Ok(Enriched::new(roadmap, ContentSource::Generated))
    }

    fn fallback(&self, request: &RoadmapRequest) -> CareerRoadmap {
        templated_roadmap(&request.career, request.profile.as_ref())
    }
}

/// Generic roadmap for `career`, personalised with up to two strong subjects
pub fn templated_roadmap(career: &str, profile: Option<&AcademicProfile>) -> CareerRoadmap {
    let career = match career.trim() {
        "" => "your chosen career",
        trimmed => trimmed,
    };
    let strengths = profile
        .map(|p| p.strongest_subjects(2))
        .unwrap_or_default();

    let mut short_term_goals = vec![
        format!("Research what a {} does day to day", career),
        format!("Talk to at least one working {}", career),
    ];
    let mut skills_to_develop = vec![
        "Communication".to_string(),
        "Problem solving".to_string(),
    ];
    if !strengths.is_empty() {
        short_term_goals.push(format!(
            "Keep building on your strengths in {}",
            strengths.join(" and ")
        ));
        skills_to_develop.extend(strengths.iter().map(|s| format!("Advanced {}", s)));
    }

    CareerRoadmap {
        short_term_goals,
        mid_term_goals: vec![
            format!("Complete the education usually required for a {}", career),
            "Gain hands-on experience through an internship or project".to_string(),
        ],
        long_term_goals: vec![
            format!("Establish yourself as a {}", career),
            "Mentor others entering the field".to_string(),
        ],
        education_requirements: vec![format!(
            "A relevant degree or qualification for {}",
            career
        )],
        skills_to_develop,
        experience_needed: vec!["Internships, volunteering or entry-level roles".to_string()],
        certifications: vec!["Industry certifications recognised in your region".to_string()],
        personal_development: vec![
            "Set yearly learning goals".to_string(),
            "Seek regular feedback".to_string(),
        ],
        networking_suggestions: vec![
            "Join a professional association".to_string(),
            "Attend career fairs and industry events".to_string(),
        ],
        milestones: vec![
            "Finish secondary education".to_string(),
            "Earn your first qualification".to_string(),
            format!("Land your first role as a {}", career),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DisabledContentService;
    use crate::enrichment::resolve;
    use crate::enrichment::test_support::ScriptedContent;
    use std::time::Duration;

    fn profile() -> AcademicProfile {
        AcademicProfile::from_json(&json!({"math_score": 95, "physics_score": 88, "history_score": 40}))
            .unwrap()
    }

    #[test]
    fn test_template_uses_strongest_subjects() {
        let roadmap = templated_roadmap("Mechanical Engineer", Some(&profile()));

        assert!(roadmap.is_well_formed());
        assert!(roadmap.short_term_goals.iter().any(|g| g.contains("Math and Physics")));
        assert!(roadmap.skills_to_develop.contains(&"Advanced Math".to_string()));
    }

    #[test]
    fn test_template_without_profile() {
        let roadmap = templated_roadmap("Teacher", None);
        assert!(roadmap.is_well_formed());
        assert_eq!(roadmap.short_term_goals.len(), 2);
        assert!(roadmap.milestones.iter().any(|m| m.contains("Teacher")));
    }

    #[tokio::test]
    async fn test_generated_roadmap() {
        let content = ScriptedContent::default().reply(
            ContentTopic::CareerRoadmap,
            json!({
                "shortTermGoals": ["a"],
                "mid_term_goals": ["b"],
                "longTermGoals": ["c"]
            }),
        );
        let content = Arc::new(content);
        let provider = CareerRoadmapProvider::new(content.clone());
        let request = RoadmapRequest {
            career: "Doctor".to_string(),
            profile: Some(profile()),
        };
        let result = resolve(&provider, &request, Duration::from_secs(1)).await;

        assert_eq!(result.source, ContentSource::Generated);
        assert_eq!(result.data.mid_term_goals, vec!["b".to_string()]);

        let sent = content.requests.lock().unwrap();
        assert_eq!(sent[0].1["academicProfile"]["math_score"], 95.0);
    }

    #[tokio::test]
    async fn test_unconfigured_falls_back_to_template() {
        let provider = CareerRoadmapProvider::new(Arc::new(DisabledContentService));
        let request = RoadmapRequest {
            career: "Lawyer".to_string(),
            profile: None,
        };
        let result = resolve(&provider, &request, Duration::from_secs(1)).await;

        assert!(result.is_fallback());
        assert!(result.data.long_term_goals[0].contains("Lawyer"));
    }
}
