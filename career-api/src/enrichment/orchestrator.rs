//! Enrichment orchestrator
//!
//! Each provider call runs in its own task so a panicking provider degrades
//! to its fallback instead of taking the request down. Kinds requested
//! together run concurrently; the bundle is returned once all have settled.

use std::sync::Arc;
use std::time::Duration;

use career_common::{
    AcademicProfile, AlternativeCareerMatch, CareerProfile, CareerRoadmap, InstitutionSummary,
};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    resolve, AlternativeCareersProvider, AlternativesRequest, CareerDetailProvider,
    CareerDetailRequest, CareerRoadmapProvider, EnrichmentKind, EnrichmentProvider, Enriched,
    InstitutionRequest, InstitutionSummaryProvider, RoadmapRequest,
};
use crate::content::ContentService;

/// Enrichments attached to a recommendation, each tagged with its source
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_detail: Option<Enriched<CareerProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_roadmap: Option<Enriched<CareerRoadmap>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_careers: Option<Enriched<Vec<AlternativeCareerMatch>>>,
}

#[derive(Clone)]
pub struct EnrichmentOrchestrator {
    career_detail: Arc<CareerDetailProvider>,
    roadmap: Arc<CareerRoadmapProvider>,
    alternatives: Arc<AlternativeCareersProvider>,
    institution: Arc<InstitutionSummaryProvider>,
    timeout: Duration,
}

impl EnrichmentOrchestrator {
    /// All providers share one content service and one per-call timeout
    pub fn new(content: Arc<dyn ContentService>, timeout: Duration) -> Self {
        Self {
            career_detail: Arc::new(CareerDetailProvider::new(Arc::clone(&content))),
            roadmap: Arc::new(CareerRoadmapProvider::new(Arc::clone(&content))),
            alternatives: Arc::new(AlternativeCareersProvider::new(Arc::clone(&content))),
            institution: Arc::new(InstitutionSummaryProvider::new(content)),
            timeout,
        }
    }

    pub async fn career_detail(&self, career: &str) -> Enriched<CareerProfile> {
        let request = CareerDetailRequest {
            career: career.to_string(),
        };
        isolated(Arc::clone(&self.career_detail), request, self.timeout).await
    }

    pub async fn career_roadmap(
        &self,
        career: &str,
        profile: Option<AcademicProfile>,
    ) -> Enriched<CareerRoadmap> {
        let request = RoadmapRequest {
            career: career.to_string(),
            profile,
        };
        isolated(Arc::clone(&self.roadmap), request, self.timeout).await
    }

    pub async fn alternative_careers(&self, career: &str) -> Enriched<Vec<AlternativeCareerMatch>> {
        let request = AlternativesRequest {
            career: career.to_string(),
        };
        isolated(Arc::clone(&self.alternatives), request, self.timeout).await
    }

    pub async fn institution_summary(
        &self,
        name: &str,
        additional_info: Option<String>,
    ) -> Enriched<InstitutionSummary> {
        let request = InstitutionRequest {
            name: name.to_string(),
            additional_info,
        };
        isolated(Arc::clone(&self.institution), request, self.timeout).await
    }

    /// Run the requested career-keyed kinds concurrently
    pub async fn enrich_all(
        &self,
        career: &str,
        profile: Option<AcademicProfile>,
        kinds: &[EnrichmentKind],
    ) -> EnrichmentBundle {
        let wants = |kind: EnrichmentKind| kinds.contains(&kind);

        if wants(EnrichmentKind::InstitutionSummary) {
            debug!("Institution summaries are keyed by name, not career; skipping");
        }

        let detail = async {
            if wants(EnrichmentKind::CareerDetail) {
                Some(self.career_detail(career).await)
            } else {
                None
            }
        };
        let roadmap = async {
            if wants(EnrichmentKind::CareerRoadmap) {
                Some(self.career_roadmap(career, profile).await)
            } else {
                None
            }
        };
        let alternatives = async {
            if wants(EnrichmentKind::AlternativeCareers) {
                Some(self.alternative_careers(career).await)
            } else {
                None
            }
        };

        let (career_detail, career_roadmap, alternative_careers) =
            tokio::join!(detail, roadmap, alternatives);

        EnrichmentBundle {
            career_detail,
            career_roadmap,
            alternative_careers,
        }
    }
}

/// Resolve in a separate task; a panic inside the provider yields its fallback
async fn isolated<P>(provider: Arc<P>, request: P::Request, timeout: Duration) -> Enriched<P::Output>
where
    P: EnrichmentProvider + 'static,
    P::Request: Clone + 'static,
    P::Output: 'static,
{
    let task_provider = Arc::clone(&provider);
    let task_request = request.clone();
    let handle = tokio::spawn(async move {
        resolve(task_provider.as_ref(), &task_request, timeout).await
    });

    match handle.await {
        Ok(enriched) => enriched,
        Err(e) => {
            warn!(kind = provider.kind().as_str(), error = %e, "Enrichment task aborted, using fallback");
            Enriched::fallback(provider.fallback(&request))
        }
    }
}
