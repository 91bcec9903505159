//! Single-slot cache with a fixed freshness window.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct CacheEntry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// Holds at most one value and serves it while it is younger than the TTL.
///
/// Expired entries are not evicted; they are simply never returned and are
/// replaced by the next [`set`](Self::set). Writers swap the whole entry, so
/// readers see either the old value or the new one, never a mix.
pub struct FreshnessCache<T> {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry<T>>>,
}

impl<T> FreshnessCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached value if it is still fresh.
    pub async fn get(&self) -> Option<Arc<T>> {
        self.get_at(Instant::now()).await
    }

    /// Returns the cached value if `now - fetched_at < ttl`.
    ///
    /// A `now` earlier than the fetch time counts as fresh.
    pub async fn get_at(&self, now: Instant) -> Option<Arc<T>> {
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;
        if now.saturating_duration_since(entry.fetched_at) < self.ttl {
            Some(Arc::clone(&entry.value))
        } else {
            None
        }
    }

    /// Replaces the cached value and restarts the freshness window.
    pub async fn set(&self, value: Arc<T>) {
        self.set_at(value, Instant::now()).await;
    }

    pub async fn set_at(&self, value: Arc<T>, now: Instant) {
        let entry = CacheEntry {
            value,
            fetched_at: now,
        };
        *self.slot.write().await = Some(entry);
    }
}
