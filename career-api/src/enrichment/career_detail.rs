//! Career detail provider
//!
//! Knowledge table first, then the generative collaborator, then a generic
//! record.

use std::sync::Arc;

use async_trait::async_trait;
use career_common::{CareerProfile, ContentSource};
use serde_json::json;

use super::{knowledge, EnrichmentError, EnrichmentKind, EnrichmentProvider, Enriched};
use crate::content::{generate_as, ContentService, ContentTopic};

#[derive(Debug, Clone)]
pub struct CareerDetailRequest {
    pub career: String,
}

pub struct CareerDetailProvider {
    content: Arc<dyn ContentService>,
}

impl CareerDetailProvider {
    pub fn new(content: Arc<dyn ContentService>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl EnrichmentProvider for CareerDetailProvider {
    type Request = CareerDetailRequest;
    type Output = CareerProfile;

    fn kind(&self) -> EnrichmentKind {
        EnrichmentKind::CareerDetail
    }

    async fn fetch(&self, request: &CareerDetailRequest) -> Result<Enriched<CareerProfile>, EnrichmentError> {
        if let Some((name, profile)) = knowledge::lookup(&request.career) {
            tracing::debug!(requested = %request.career, matched = name, "Career found in knowledge table");
            return Ok(Enriched::new(profile, ContentSource::Static));
        }

        let profile: CareerProfile = generate_as(
            self.content.as_ref(),
            ContentTopic::CareerDetail,
            json!({ "career": request.career }),
        )
        .await?;

        if !profile.is_well_formed() {
            return Err(EnrichmentError::Malformed(
                "career profile missing required fields".to_string(),
            ));
        }
        Ok(Enriched::new(profile, ContentSource::Generated))
    }

    fn fallback(&self, request: &CareerDetailRequest) -> CareerProfile {
        knowledge::generic_profile(&request.career)
    }
}
