use crate::error::{AppError, AppResult};
use crate::infrastructure::http::{FormPart, RequestBody};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

/// Method, headers and body of an API call. Defaults to a bodiless GET.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn json<T: Serialize + ?Sized>(method: Method, body: &T) -> AppResult<Self> {
        Ok(Self {
            body: RequestBody::Json(serde_json::to_vec(body)?),
            ..Self::new(method)
        })
    }

    pub fn post_json<T: Serialize + ?Sized>(body: &T) -> AppResult<Self> {
        Self::json(Method::POST, body)
    }

    pub fn put_json<T: Serialize + ?Sized>(body: &T) -> AppResult<Self> {
        Self::json(Method::PUT, body)
    }

    pub fn multipart(method: Method, parts: Vec<FormPart>) -> Self {
        Self {
            body: RequestBody::Multipart(parts),
            ..Self::new(method)
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> AppResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::BadRequest(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Whether the backend demands a CSRF token for this method
    pub fn is_write(&self) -> bool {
        matches!(
            self.method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }
}

/// Per-call behavior of the fetch wrapper
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub cache_key: Option<String>,
}

impl FetchOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn cached(key: impl Into<String>) -> Self {
        Self {
            cache_key: Some(key.into()),
        }
    }
}
