use crate::error::AppResult;
use crate::infrastructure::clock::{Clock, SystemClock};
use crate::infrastructure::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Default lifetime of a cached response
pub const CACHE_TTL_MS: i64 = 60 * 1000;

/// What is stored under a cache key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: i64,
    pub data: Value,
}

/// Time-boxed read-through cache for JSON responses.
///
/// Expired entries are evicted lazily when read; there is no size bound and
/// no background sweeping.
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl_ms: i64) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), ttl_ms)
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl_ms: i64) -> Self {
        Self {
            store,
            clock,
            ttl_ms,
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Live value for `key`, or `None` when absent, expired or unreadable
    pub fn get(&self, key: &str) -> Option<Value> {
        let raw = self.store.get_item(key)?;

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(cache_key = key, error = %e, "Dropping unreadable cache entry");
                self.evict(key);
                return None;
            }
        };

        if self.clock.now_millis() - entry.timestamp > self.ttl_ms {
            tracing::debug!(cache_key = key, "Cache entry expired");
            self.evict(key);
            return None;
        }

        Some(entry.data)
    }

    pub fn set(&self, key: &str, data: &Value) -> AppResult<()> {
        let entry = CacheEntry {
            timestamp: self.clock.now_millis(),
            data: data.clone(),
        };
        self.store.set_item(key, &serde_json::to_string(&entry)?)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.clear()
    }

    fn evict(&self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            tracing::warn!(cache_key = key, error = %e, "Failed to evict cache entry");
        }
    }
}
