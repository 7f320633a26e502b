use crate::domain::auth::TokenStore;
use crate::domain::cache::ResponseCache;
use crate::error::AppResult;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::{FileStore, KeyValueStore, SessionStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-user client state: tokens, cached responses and the refresh guard.
///
/// Passed explicitly to the API client and every service instead of living
/// in process-wide globals.
pub struct SessionContext {
    tokens: TokenStore,
    cache: ResponseCache,
    refresh_lock: Mutex<()>,
}

impl SessionContext {
    pub fn new(tokens: TokenStore, cache: ResponseCache) -> Self {
        Self {
            tokens,
            cache,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Tokens persisted to the configured file, cache kept in memory
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.token_file)?);
        let session: Arc<dyn KeyValueStore> = Arc::new(SessionStore::new());

        Ok(Self::new(
            TokenStore::new(durable),
            ResponseCache::new(session, config.cache_ttl_ms),
        ))
    }

    /// Session that keeps everything in memory
    pub fn in_memory(cache_ttl_ms: i64) -> Self {
        Self::new(
            TokenStore::new(Arc::new(SessionStore::new())),
            ResponseCache::new(Arc::new(SessionStore::new()), cache_ttl_ms),
        )
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub(crate) fn refresh_lock(&self) -> &Mutex<()> {
        &self.refresh_lock
    }

    /// Forget the user: drop both tokens and every cached response
    pub fn end(&self) -> AppResult<()> {
        self.tokens.clear()?;
        self.cache.clear()
    }
}
