pub mod options;

pub use options::{FetchOptions, RequestOptions};

use crate::domain::auth::TokenRefresher;
use crate::domain::session::SessionContext;
use crate::error::{AppError, AppResult};
use crate::infrastructure::http::{HttpRequest, HttpResponse, HttpTransport};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Authenticated fetch wrapper over the storefront API.
///
/// Every call:
/// - serves a live cached response when a cache key is given
/// - attaches the bearer token and, for writes, the CSRF token
/// - refreshes the access token and retries once on a 401
/// - turns non-success responses into [`AppError::Request`]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    session: Arc<SessionContext>,
    refresher: TokenRefresher,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_base: impl Into<String>,
        session: Arc<SessionContext>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let refresher = TokenRefresher::new(transport.clone(), api_base.clone(), session.clone());

        Self {
            transport,
            api_base,
            session,
            refresher,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn refresher(&self) -> &TokenRefresher {
        &self.refresher
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    /// Parsed JSON body of a successful call. A 204 yields `{}`.
    pub async fn fetch(
        &self,
        endpoint: &str,
        options: RequestOptions,
        fetch_options: FetchOptions,
    ) -> AppResult<Value> {
        let cache_key = fetch_options.cache_key.as_deref();

        if let Some(key) = cache_key {
            if let Some(cached) = self.session.cache().get(key) {
                tracing::debug!(endpoint, cache_key = key, "Serving cached response");
                return Ok(cached);
            }
        }

        let response = self.send_authorized(endpoint, options, true).await?;

        let json = if response.status == StatusCode::NO_CONTENT {
            json!({})
        } else {
            response.json()?
        };

        if let Some(key) = cache_key {
            self.session.cache().set(key, &json)?;
        }

        Ok(json)
    }

    /// [`fetch`](Self::fetch) decoded into `T`
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        fetch_options: FetchOptions,
    ) -> AppResult<T> {
        let value = self.fetch(endpoint, options, fetch_options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Same auth, CSRF and refresh handling as [`fetch`](Self::fetch) but the
    /// body is left untouched: no forced JSON content type, no parsing, no
    /// caching. Used for multipart uploads and file downloads.
    pub async fn fetch_raw(&self, endpoint: &str, options: RequestOptions) -> AppResult<HttpResponse> {
        self.send_authorized(endpoint, options, false).await
    }

    async fn send_authorized(
        &self,
        endpoint: &str,
        options: RequestOptions,
        force_json: bool,
    ) -> AppResult<HttpResponse> {
        let url = self.url(endpoint);
        let access = self.session.tokens().access();
        let headers = self.build_headers(&url, &options, access.as_deref(), force_json)?;

        let mut request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };

        let mut response = self.transport.send(request.clone()).await?;

        if response.status == StatusCode::UNAUTHORIZED && self.session.tokens().refresh().is_some() {
            tracing::debug!(endpoint, "Access token rejected, refreshing");

            match self.refresher.refresh_after_rejection(access.as_deref()).await? {
                Some(token) => {
                    request.headers.insert(AUTHORIZATION, bearer(&token)?);
                    response = self.transport.send(request).await?;
                }
                None => {
                    tracing::warn!(endpoint, "Refresh failed, session is no longer authorized");
                    return Err(AppError::Unauthorized);
                }
            }
        }

        if !response.is_success() {
            let status = response.status;
            tracing::warn!(endpoint, status = status.as_u16(), "Request failed");
            return Err(AppError::from_response(status, response.text()));
        }

        Ok(response)
    }

    fn build_headers(
        &self,
        url: &str,
        options: &RequestOptions,
        access: Option<&str>,
        force_json: bool,
    ) -> AppResult<HeaderMap> {
        let mut headers = options.headers.clone();

        if let Some(token) = access {
            headers.insert(AUTHORIZATION, bearer(token)?);
        }

        if options.is_write() {
            match self.transport.cookie(url, CSRF_COOKIE) {
                Some(csrf) => {
                    let value = HeaderValue::from_str(&csrf)
                        .map_err(|e| AppError::Internal(format!("Unusable CSRF cookie: {}", e)))?;
                    headers.insert(CSRF_HEADER, value);
                }
                None => tracing::debug!(url, "No csrftoken cookie for write request"),
            }
        }

        if force_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }
}

/// `Authorization: Bearer <token>` header value
pub fn bearer(token: &str) -> AppResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| AppError::Internal(format!("Unusable access token: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}
