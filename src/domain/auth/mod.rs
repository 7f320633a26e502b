pub mod dto;
pub mod refresh;
pub mod service;
pub mod token_store;

pub use dto::{RefreshTokenRequest, RefreshTokenResponse, TokenPair};
pub use refresh::TokenRefresher;
pub use service::AuthService;
pub use token_store::{TokenKind, TokenStore};
