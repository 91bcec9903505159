//! Cache-first access to the store's feed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use advent_core::StoreProfile;
use advent_upstream::{CalendarSnapshot, UpstreamClient, UpstreamError};

use crate::atom::FeedDocument;
use crate::builder::build_feed;
use crate::cache::FreshnessCache;

/// Anything that can produce today's calendar.
pub trait CalendarSource: Send + Sync {
    fn fetch_calendar(
        &self,
    ) -> impl Future<Output = Result<CalendarSnapshot, UpstreamError>> + Send;
}

impl CalendarSource for UpstreamClient {
    fn fetch_calendar(
        &self,
    ) -> impl Future<Output = Result<CalendarSnapshot, UpstreamError>> + Send {
        UpstreamClient::fetch_calendar(self)
    }
}

/// Serves the feed from the cache, rebuilding it from `source` on a miss.
///
/// Concurrent misses are not coalesced: each one fetches and builds its own
/// document, and the last to finish is what stays cached.
pub struct FeedService<S> {
    source: S,
    profile: StoreProfile,
    cache: FreshnessCache<FeedDocument>,
}

impl<S: CalendarSource> FeedService<S> {
    #[must_use]
    pub fn new(source: S, profile: StoreProfile, cache_ttl: Duration) -> Self {
        Self {
            source,
            profile,
            cache: FreshnessCache::new(cache_ttl),
        }
    }

    #[must_use]
    pub fn profile(&self) -> &StoreProfile {
        &self.profile
    }

    /// Returns the current feed.
    ///
    /// # Errors
    ///
    /// Returns the [`UpstreamError`] from the fetch unchanged on a cache miss
    /// that fails. The cache is left as it was.
    pub async fn get_feed(&self) -> Result<Arc<FeedDocument>, UpstreamError> {
        if let Some(feed) = self.cache.get().await {
            tracing::info!(store = %self.profile.name, "serving from cache");
            return Ok(feed);
        }

        tracing::info!(store = %self.profile.name, "fetching fresh data");
        let calendar = self.source.fetch_calendar().await?;
        let feed = Arc::new(build_feed(&calendar, &self.profile));
        tracing::debug!(
            store = %self.profile.name,
            entries = feed.entries.len(),
            "feed rebuilt"
        );

        self.cache.set(Arc::clone(&feed)).await;
        Ok(feed)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
