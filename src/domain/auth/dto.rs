use serde::{Deserialize, Serialize};

/// Access/refresh pair as issued by `POST /auth/token/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    pub fn access_only(access: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: None,
        }
    }
}

/// Login request body; the backend accepts the email as `username`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

/// Refresh token response. A rotated `refresh` may be present and is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}
