use crate::error::AppResult;

/// String key/value storage used for tokens and cached responses.
///
/// Mirrors the browser storage contract: reads never fail, writes are
/// synchronous and may fail only for durable backends.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    fn remove_item(&self, key: &str) -> AppResult<()>;

    /// Remove every key
    fn clear(&self) -> AppResult<()>;
}
