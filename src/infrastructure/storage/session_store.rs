use super::key_value_store::KeyValueStore;
use crate::error::AppResult;
use moka::sync::Cache;

/// In-memory store that lives as long as the client session.
///
/// Unbounded: entries leave only through `remove_item`/`clear`, expiry is
/// decided by the caller.
#[derive(Clone)]
pub struct SessionStore {
    entries: Cache<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for SessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.entries.invalidate(key);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.entries.invalidate_all();
        Ok(())
    }
}
