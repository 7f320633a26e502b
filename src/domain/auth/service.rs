use super::dto::LoginRequest;
use super::TokenPair;
use crate::domain::user::User;
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::http::{HttpRequest, RequestBody};
use crate::domain::shared::BackendErrorBody;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::sync::Arc;

pub const LOGIN_ENDPOINT: &str = "/auth/token/";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/user/";
pub const FULL_LOGOUT_ENDPOINT: &str = "/auth/full-logout/";

/// Where the UI goes after logging out
pub const LOGIN_ROUTE: &str = "/login";
/// Where the UI goes after a Google login completes
pub const HOME_ROUTE: &str = "/";

pub struct AuthService {
    client: Arc<ApiClient>,
    backend_base_url: String,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, backend_base_url: String) -> Self {
        Self {
            client,
            backend_base_url,
        }
    }

    /// Exchange credentials for a token pair and persist it
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = serde_json::to_vec(&LoginRequest {
            username: email,
            password,
        })?;

        let response = self
            .client
            .transport()
            .send(HttpRequest {
                method: Method::POST,
                url: self.client.url(LOGIN_ENDPOINT),
                headers,
                body: RequestBody::Json(body),
            })
            .await?;

        if !response.is_success() {
            let detail = BackendErrorBody::parse(&response.text()).and_then(BackendErrorBody::into_detail);
            tracing::warn!(status = response.status.as_u16(), "Login rejected");
            return Err(AppError::InvalidCredentials(detail));
        }

        let tokens: TokenPair = response.json()?;
        self.client.session().tokens().save(&tokens)?;
        tracing::info!("Logged in");

        Ok(tokens)
    }

    /// Log out server-side (best effort) and forget the session locally.
    /// Returns the route to show next.
    pub async fn logout(&self) -> AppResult<&'static str> {
        let request = HttpRequest {
            method: Method::POST,
            url: self.client.url(FULL_LOGOUT_ENDPOINT),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        };

        match self.client.transport().send(request).await {
            Ok(response) if !response.is_success() => {
                tracing::debug!(status = response.status.as_u16(), "Server-side logout refused");
            }
            Err(e) => tracing::debug!(error = %e, "Server-side logout failed"),
            Ok(_) => {}
        }

        self.client.session().end()?;
        Ok(LOGIN_ROUTE)
    }

    /// Current user, trying the cookie session first and then the bearer
    /// token. A rejected bearer token is refreshed once.
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        match self.get_user(None).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Session auth failed"),
        }

        let tokens = self.client.session().tokens();
        let Some(mut token) = tokens.access() else {
            return Ok(None);
        };

        let mut refreshed = false;
        loop {
            let request = self.user_request(Some(&token))?;
            let response = self.client.transport().send(request).await?;

            if response.status == StatusCode::UNAUTHORIZED && !refreshed {
                refreshed = true;
                match self.client.refresher().refresh_after_rejection(Some(&token)).await? {
                    Some(new_token) => {
                        token = new_token;
                        continue;
                    }
                    None => return Ok(None),
                }
            }

            if response.is_success() {
                return Ok(Some(response.json()?));
            }
            return Ok(None);
        }
    }

    /// Browser URL that starts the Google OAuth flow
    pub fn google_login_url(&self) -> String {
        format!("{}/accounts/google/login/?process=login", self.backend_base_url)
    }

    /// Store the tokens handed back by the Google redirect
    pub fn complete_google_login(&self, access: &str, refresh: &str) -> AppResult<&'static str> {
        self.client
            .session()
            .tokens()
            .save(&TokenPair::new(access, refresh))?;
        Ok(HOME_ROUTE)
    }

    async fn get_user(&self, token: Option<&str>) -> AppResult<Option<User>> {
        let response = self.client.transport().send(self.user_request(token)?).await?;
        if response.is_success() {
            Ok(Some(response.json()?))
        } else {
            Ok(None)
        }
    }

    fn user_request(&self, token: Option<&str>) -> AppResult<HttpRequest> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(AUTHORIZATION, crate::infrastructure::api::bearer(token)?);
        }
        Ok(HttpRequest {
            method: Method::GET,
            url: self.client.url(CURRENT_USER_ENDPOINT),
            headers,
            body: RequestBody::Empty,
        })
    }
}
