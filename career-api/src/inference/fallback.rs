//! Static fallback tier
//!
//! Last resort when no model answered: a uniform random draw from a fixed
//! career catalog. Results from this tier are always flagged as `Fallback`.

use career_common::catalog::CAREER_CATALOG;
use career_common::{Error, Result};
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct StaticFallback {
    catalog: Vec<String>,
}

impl Default for StaticFallback {
    fn default() -> Self {
        Self {
            catalog: CAREER_CATALOG.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl StaticFallback {
    /// Fallback over a custom catalog, which must not be empty
    pub fn with_catalog(catalog: Vec<String>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::Config("fallback catalog is empty".to_string()));
        }
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Uniform draw from the catalog
    pub fn pick(&self) -> String {
        self.catalog
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| CAREER_CATALOG[0].to_string())
    }
}
