use reqwest::StatusCode;

use crate::domain::shared::BackendErrorBody;

/// Main client error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized: please log in again")]
    Unauthorized,

    #[error("Invalid credentials{}", .0.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    InvalidCredentials(Option<String>),

    #[error("Request failed ({}): {body}", .status.as_u16())]
    Request {
        status: StatusCode,
        body: String,
        detail: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a request error from a non-success response, keeping the raw body
    /// and pulling out the backend's `detail` (or `error`) field when present.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let detail = BackendErrorBody::parse(&body).and_then(BackendErrorBody::into_detail);
        Self::Request {
            status,
            body,
            detail,
        }
    }

    /// HTTP status associated with this error, if any
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Machine-readable detail reported by the backend
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Request { detail, .. } => detail.as_deref(),
            Self::InvalidCredentials(detail) => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Decode(_) => true,
            Self::Request { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Custom result type for the client
pub type AppResult<T> = Result<T, AppError>;
