//! Enrichment providers
//!
//! Each provider wraps one collaborator call and owns a static fallback of
//! the same shape. [`resolve`] applies the timeout and converts every failure
//! into that fallback, so callers always receive a well-formed record.

pub mod alternatives;
pub mod career_detail;
pub mod institution;
pub mod knowledge;
pub mod orchestrator;
pub mod roadmap;

pub use alternatives::{AlternativeCareersProvider, AlternativesRequest};
pub use career_detail::{CareerDetailProvider, CareerDetailRequest};
pub use institution::{InstitutionRequest, InstitutionSummaryProvider};
pub use orchestrator::{EnrichmentBundle, EnrichmentOrchestrator};
pub use roadmap::{CareerRoadmapProvider, RoadmapRequest};

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use career_common::ContentSource;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::ContentError;

/// Enrichment failure, never surfaced to callers
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("content service: {0}")]
    Content(#[from] ContentError),

    #[error("malformed content: {0}")]
    Malformed(String),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("no usable results")]
    NoResults,
}

/// Supplementary content kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentKind {
    CareerDetail,
    CareerRoadmap,
    AlternativeCareers,
    InstitutionSummary,
}

impl EnrichmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentKind::CareerDetail => "career-detail",
            EnrichmentKind::CareerRoadmap => "career-roadmap",
            EnrichmentKind::AlternativeCareers => "alternative-careers",
            EnrichmentKind::InstitutionSummary => "institution-summary",
        }
    }
}

impl FromStr for EnrichmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "career-detail" => Ok(EnrichmentKind::CareerDetail),
            "career-roadmap" => Ok(EnrichmentKind::CareerRoadmap),
            "alternative-careers" => Ok(EnrichmentKind::AlternativeCareers),
            "institution-summary" => Ok(EnrichmentKind::InstitutionSummary),
            other => Err(format!("unknown enrichment kind: {}", other)),
        }
    }
}

/// Enrichment payload tagged with where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<T> {
    pub data: T,
    pub source: ContentSource,
}

impl<T> Enriched<T> {
    pub fn new(data: T, source: ContentSource) -> Self {
        Self { data, source }
    }

    pub fn fallback(data: T) -> Self {
        Self::new(data, ContentSource::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

/// One enrichment kind: a fallible fetch plus an infallible fallback
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    type Request: Send + Sync;
    type Output: Send;

    fn kind(&self) -> EnrichmentKind;

    async fn fetch(&self, request: &Self::Request) -> Result<Enriched<Self::Output>, EnrichmentError>;

    /// Generic record of the same shape; must not fail
    fn fallback(&self, request: &Self::Request) -> Self::Output;
}

/// Fetch with a bounded timeout, substituting the fallback on any failure
pub async fn resolve<P>(provider: &P, request: &P::Request, timeout: Duration) -> Enriched<P::Output>
where
    P: EnrichmentProvider + ?Sized,
{
    let kind = provider.kind().as_str();
    let outcome = match tokio::time::timeout(timeout, provider.fetch(request)).await {
        Ok(result) => result,
        Err(_) => Err(EnrichmentError::Timeout(timeout)),
    };

    match outcome {
        Ok(enriched) => {
            debug!(kind, source = enriched.source.as_str(), "Enrichment resolved");
            enriched
        }
        Err(EnrichmentError::Content(ContentError::NotConfigured)) => {
            debug!(kind, "Content service not configured, using fallback");
            Enriched::fallback(provider.fallback(request))
        }
        Err(e) => {
            warn!(kind, error = %e, "Enrichment failed, using fallback");
            Enriched::fallback(provider.fallback(request))
        }
    }
}
