//! Public model catalog: scraping, suitability, caching

pub mod cache;
pub mod scraper;
pub mod suitability;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

pub use self::cache::{CatalogCache, Clock, SystemClock};
pub use self::scraper::LibraryScraper;
pub use self::suitability::SizeClassifier;

/// One model advertised on the public library page
///
/// Built fresh on every scrape and immutable afterwards; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical slug, unique within one scrape result
    pub name: String,

    /// Display name; falls back to `name` when the page has no heading
    pub title: String,

    /// Free-text summary; empty when the page has no paragraph
    pub description: String,

    /// Parameter-size string like `"7B"`, or `"Unknown"`
    pub param_size: String,

    /// Whether the parameter count fits the target GPU
    pub suitable_for_target: bool,

    /// Fully-qualified link to the entry's public page
    pub url: String,
}

/// Source of catalog entries
///
/// [`LibraryScraper`] is the production implementation; the cache and the
/// enricher depend on this trait so tests can substitute a canned source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch at most `limit` entries from the public library
    async fn scrape(&self, limit: usize) -> Result<Vec<CatalogEntry>, BridgeError>;
}
