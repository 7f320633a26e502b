use super::TokenPair;
use crate::error::AppResult;
use crate::infrastructure::storage::KeyValueStore;
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_TOKEN_KEY,
            TokenKind::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

/// Access and refresh tokens over a durable key/value store
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, kind: TokenKind) -> Option<String> {
        self.store
            .get_item(kind.storage_key())
            .filter(|token| !token.is_empty())
    }

    pub fn access(&self) -> Option<String> {
        self.get(TokenKind::Access)
    }

    pub fn refresh(&self) -> Option<String> {
        self.get(TokenKind::Refresh)
    }

    /// Write only the tokens present in `pair`; empty strings count as absent
    pub fn save(&self, pair: &TokenPair) -> AppResult<()> {
        if let Some(access) = pair.access.as_deref().filter(|t| !t.is_empty()) {
            self.store.set_item(ACCESS_TOKEN_KEY, access)?;
        }
        if let Some(refresh) = pair.refresh.as_deref().filter(|t| !t.is_empty()) {
            self.store.set_item(REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove_item(ACCESS_TOKEN_KEY)?;
        self.store.remove_item(REFRESH_TOKEN_KEY)
    }
}
