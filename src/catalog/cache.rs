//! Time-bounded cache for the scraped catalog

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use super::{CatalogEntry, CatalogSource};
use crate::error::BridgeError;

/// Clock abstraction so cache expiry is deterministic in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheSlot {
    entries: Vec<CatalogEntry>,
    fetched_at: DateTime<Utc>,
}

/// Process-wide cache of the last successful catalog scrape
///
/// A slot is fresh while it is non-empty and `now - fetched_at` stays under
/// the freshness window. Refreshes run under the slot mutex, so concurrent
/// misses collapse into a single upstream scrape. A failed refresh
/// propagates to the caller and leaves the previous slot intact; stale
/// entries are never served in its place.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    clock: Arc<dyn Clock>,
    freshness_window: TimeDelta,
    slot: Mutex<Option<CacheSlot>>,
}

impl CatalogCache {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        clock: Arc<dyn Clock>,
        freshness_window: Duration,
    ) -> Self {
        Self {
            source,
            clock,
            freshness_window: TimeDelta::from_std(freshness_window).unwrap_or(TimeDelta::MAX),
            slot: Mutex::new(None),
        }
    }

    /// Return the cached catalog, scraping at most `limit` entries on a
    /// miss or after the freshness window has elapsed.
    pub async fn get(&self, limit: usize) -> Result<Vec<CatalogEntry>, BridgeError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if !cached.entries.is_empty()
                && self.clock.now() - cached.fetched_at < self.freshness_window
            {
                tracing::debug!("Serving catalog from cache");
                return Ok(cached.entries.clone());
            }
        }

        tracing::info!(limit, "Refreshing catalog from library");
        let entries = self.source.scrape(limit).await?;
        *slot = Some(CacheSlot {
            entries: entries.clone(),
            fetched_at: self.clock.now(),
        });

        Ok(entries)
    }
}
