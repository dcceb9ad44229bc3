//! Institution summary provider

use std::sync::Arc;

use async_trait::async_trait;
use career_common::{ContentSource, InstitutionSummary};
use serde_json::json;

use super::{EnrichmentError, EnrichmentKind, EnrichmentProvider, Enriched};
use crate::content::{generate_as, ContentService, ContentTopic};

#[derive(Debug, Clone)]
pub struct InstitutionRequest {
    pub name: String,
    pub additional_info: Option<String>,
}

pub struct InstitutionSummaryProvider {
    content: Arc<dyn ContentService>,
}

impl InstitutionSummaryProvider {
    pub fn new(content: Arc<dyn ContentService>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl EnrichmentProvider for InstitutionSummaryProvider {
    type Request = InstitutionRequest;
    type Output = InstitutionSummary;

    fn kind(&self) -> EnrichmentKind {
        EnrichmentKind::InstitutionSummary
    }

    async fn fetch(
        &self,
        request: &InstitutionRequest,
    ) -> Result<Enriched<InstitutionSummary>, EnrichmentError> {
        let mut summary: InstitutionSummary = generate_as(
            self.content.as_ref(),
            ContentTopic::InstitutionSummary,
            json!({
                "name": request.name,
                "additionalInfo": request.additional_info,
            }),
        )
        .await?;

        if summary.name.trim().is_empty() {
            summary.name = request.name.clone();
        }
        if !summary.is_well_formed() {
            return Err(EnrichmentError::Malformed("summary missing overview".to_string()));
        }
        Ok(Enriched::new(summary, ContentSource::Generated))
    }

    fn fallback(&self, request: &InstitutionRequest) -> InstitutionSummary {
        generic_summary(&request.name)
    }
}

pub fn generic_summary(name: &str) -> InstitutionSummary {
    let name = match name.trim() {
        "" => "This institution",
        trimmed => trimmed,
    };

    InstitutionSummary {
        name: name.to_string(),
        overview: format!(
            "A detailed summary of {} is not available right now. \
             Check the institution's official website for current information.",
            name
        ),
        programs: vec!["See the official course catalogue".to_string()],
        admission_requirements: vec![
            "Completed secondary education".to_string(),
            "Application form and supporting documents".to_string(),
        ],
        campus_life: "Contact the admissions office or attend an open day".to_string(),
        notable_facts: Vec::new(),
    }
}
