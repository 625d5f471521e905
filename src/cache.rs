//! # Response Cache
//!
//! Keyed TTL cache shared by all endpoint handlers. Staleness is evaluated at
//! read time against the caller's TTL class; there is no background eviction,
//! and a stale entry stays in the map until it is overwritten or the store is
//! cleared. Writes are last-write-wins; concurrent misses on the same key may
//! fetch twice, which is accepted.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Named TTL policy. Each cached endpoint is statically associated with one.
#[derive(Clone, Copy, Debug)]
pub enum TtlClass {
    Ticker,
    History,
    Depth,
}

impl TtlClass {
    pub fn duration(self) -> Duration {
        match self {
            TtlClass::Ticker => Duration::from_secs(10),
            TtlClass::History => Duration::from_secs(30),
            TtlClass::Depth => Duration::from_secs(5),
        }
    }
}

struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

/// Thread-safe response cache with read-time expiry.
#[derive(Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached payload for `key` if it is younger than `ttl`.
    ///
    /// A stale entry is reported as a miss but is not removed; the caller is
    /// expected to fetch fresh data and `put` it back.
    pub async fn get(&self, key: &str, ttl: Duration) -> Option<Value> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < ttl => {
                debug!("[CACHE] hit: {}", key);
                Some(entry.payload.clone())
            }
            Some(_) => {
                debug!("[CACHE] expired: {}", key);
                None
            }
            None => {
                debug!("[CACHE] miss: {}", key);
                None
            }
        }
    }

    /// Store `payload` under `key`, overwriting any previous entry.
    pub async fn put(&self, key: &str, payload: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    /// Empty the store and return the number of entries that were present.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let previous = entries.len();
        entries.clear();
        previous
    }

    /// Number of entries currently stored, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of all stored keys, for health introspection.
    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }
}
