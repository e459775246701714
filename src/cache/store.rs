// In-memory cache store for enriched repositories.
// Handles JSON serialization, per-entry TTL checking, and background sweeping of expired entries.

use std::sync::{Arc, Weak};
use std::time::Duration;

use moka::Expiry;
use moka::sync::Cache;
use serde::{Serialize, de::DeserializeOwned};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{RepoStatsError, Result};

/// Default TTL for enriched repositories: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default interval between sweeps of expired entries: 10 minutes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// A cached payload with its age and lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized value; the store never looks inside it.
    pub payload: Arc<[u8]>,
    /// When the entry was written or last overwritten.
    pub cached_at: Instant,
    /// How long the entry stays live after `cached_at`.
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(payload: Vec<u8>, ttl: Duration) -> Self {
        Self {
            payload: payload.into(),
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Gives moka each entry's own TTL, restarted when the entry is overwritten.
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: std::time::Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: std::time::Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local TTL cache, cheap to clone and safe to share between tasks.
///
/// Keys are repository `full_name`s, which GitHub keeps unique across accounts.
#[derive(Clone)]
pub struct EnrichmentCache {
    entries: Arc<Cache<String, CacheEntry>>,
    default_ttl: Duration,
}

impl std::fmt::Debug for EnrichmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentCache")
            .field("entries", &self.entries.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl Default for EnrichmentCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl EnrichmentCache {
    pub fn new(default_ttl: Duration) -> Self {
        let entries = Cache::builder().expire_after(EntryExpiry).build();
        Self {
            entries: Arc::new(entries),
            default_ttl,
        }
    }

    /// TTL applied when callers don't pass one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store raw bytes under `key`, replacing any previous entry and restarting its TTL.
    pub fn insert_bytes(&self, key: &str, payload: Vec<u8>, ttl: Option<Duration>) {
        let entry = CacheEntry::new(payload, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.to_string(), entry);
    }

    /// Raw bytes for `key`, or `None` if missing or expired.
    ///
    /// Expiry is checked here, so an entry the sweeper hasn't reached yet is still absent.
    pub fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            self.entries.invalidate(key);
            return None;
        }
        Some(entry.payload.to_vec())
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()> {
        let payload = serde_json::to_vec(value).map_err(RepoStatsError::Cache)?;
        self.insert_bytes(key, payload, ttl);
        Ok(())
    }

    /// Deserialize the value under `key`.
    ///
    /// Returns `None` when the key was never set, has expired, or holds a payload
    /// that doesn't decode as `T`. All three mean the caller must refetch.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = self.get_bytes(key)?;
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let expired: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.entries.invalidate(key.as_str());
        }
        self.entries.run_pending_tasks();
        expired.len()
    }

    /// Number of stored entries after the store's pending maintenance has run.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Periodically purge expired entries on the current tokio runtime.
    ///
    /// The task holds a weak reference and exits once every clone of the cache is dropped.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let entries: Weak<Cache<String, CacheEntry>> = Arc::downgrade(&self.entries);
        let default_ttl = self.default_ttl;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let cache = EnrichmentCache {
                    entries,
                    default_ttl,
                };
                let removed = cache.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = cache.len(), "Swept expired cache entries");
                }
            }
        })
    }
}
