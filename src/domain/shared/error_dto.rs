use serde::{Deserialize, Serialize};

/// Error body shapes returned by the backend.
///
/// DRF views answer with `{"detail": ...}`, a few hand-written views use
/// `{"error": ...}` and the contact endpoints use `{"message": ...}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BackendErrorBody {
    /// Parse a response body, returning `None` for non-JSON or non-object bodies
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn into_detail(self) -> Option<String> {
        self.detail.or(self.error).or(self.message)
    }
}
