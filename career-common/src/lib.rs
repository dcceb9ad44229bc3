//! # Career Common Library
//!
//! Shared code for the career recommendation services:
//! - Error types
//! - Bootstrap configuration loading
//! - Academic profile schema and feature vectors
//! - The fixed career catalog
//! - Caller-facing payload types

pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod models;

pub use error::{Error, Result};
pub use features::{AcademicProfile, FeatureVector, ValidationError, FEATURE_COUNT, FEATURE_FIELDS};
pub use models::{
    AlternativeCareerMatch, CareerProfile, CareerRoadmap, ContentSource, InstitutionSummary,
    PredictionResult, SourceTier, WorkLifeBalance,
};
