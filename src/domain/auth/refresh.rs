use super::dto::{RefreshTokenRequest, RefreshTokenResponse};
use super::TokenPair;
use crate::domain::session::SessionContext;
use crate::error::AppResult;
use crate::infrastructure::http::{HttpRequest, HttpTransport, RequestBody};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;

pub const REFRESH_ENDPOINT: &str = "/auth/token/refresh/";

/// Exchanges the stored refresh token for a new access token.
///
/// Refreshes are serialized per session; the refresh token itself is never
/// rotated.
pub struct TokenRefresher {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    session: Arc<SessionContext>,
}

impl TokenRefresher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_base: String,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            transport,
            api_base,
            session,
        }
    }

    /// Refresh unconditionally. `Ok(None)` means there is no usable refresh
    /// token: either none was stored, or the backend rejected it and both
    /// tokens were cleared.
    pub async fn refresh(&self) -> AppResult<Option<String>> {
        let _guard = self.session.refresh_lock().lock().await;
        self.exchange().await
    }

    /// Refresh after the backend rejected `rejected`. When another caller
    /// already replaced that token while we waited for the lock, its result
    /// is reused instead of refreshing twice.
    pub async fn refresh_after_rejection(&self, rejected: Option<&str>) -> AppResult<Option<String>> {
        let _guard = self.session.refresh_lock().lock().await;

        if let Some(current) = self.session.tokens().access() {
            if Some(current.as_str()) != rejected {
                tracing::debug!("Access token already refreshed by a concurrent request");
                return Ok(Some(current));
            }
        }

        self.exchange().await
    }

    async fn exchange(&self) -> AppResult<Option<String>> {
        let tokens = self.session.tokens();
        let Some(refresh) = tokens.refresh() else {
            return Ok(None);
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = HttpRequest {
            method: Method::POST,
            url: format!("{}{}", self.api_base, REFRESH_ENDPOINT),
            headers,
            body: RequestBody::Json(serde_json::to_vec(&RefreshTokenRequest { refresh })?),
        };

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status.as_u16(),
                "Failed to refresh token, clearing stored tokens"
            );
            tokens.clear()?;
            return Ok(None);
        }

        let refreshed: RefreshTokenResponse = response.json()?;
        tokens.save(&TokenPair::access_only(refreshed.access.clone()))?;
        tracing::info!("Access token refreshed");

        Ok(Some(refreshed.access))
    }
}
