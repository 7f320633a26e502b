//! Scripted transport and clock shared by unit tests.

use crate::error::AppResult;
use crate::infrastructure::clock::Clock;
use crate::infrastructure::http::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};

pub const API_BASE: &str = "http://backend.test/api";

pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A request as seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub endpoint: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn json_body(&self) -> Option<Value> {
        match &self.body {
            RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        }
    }
}

/// Transport answering from per-route queues. The last queued response of a
/// route keeps answering once the earlier ones are used up; unknown routes
/// get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<HttpResponse>>>,
    sent: Mutex<Vec<SentRequest>>,
    cookies: Mutex<HashMap<String, String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, endpoint: &str, status: u16, body: Value) {
        self.on_raw(method, endpoint, status, serde_json::to_vec(&body).unwrap());
    }

    pub fn on_raw(&self, method: Method, endpoint: &str, status: u16, body: Vec<u8>) {
        self.routes
            .lock()
            .entry((method, endpoint.to_string()))
            .or_default()
            .push_back(HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body,
            });
    }

    pub fn set_cookie(&self, name: &str, value: &str) {
        self.cookies.lock().insert(name.to_string(), value.to_string());
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn count(&self, method: Method, endpoint: &str) -> usize {
        self.sent
            .lock()
            .iter()
            .filter(|r| r.method == method && r.endpoint == endpoint)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let endpoint = request
            .url
            .strip_prefix(API_BASE)
            .unwrap_or(&request.url)
            .to_string();

        self.sent.lock().push(SentRequest {
            method: request.method.clone(),
            endpoint: endpoint.clone(),
            headers: request.headers,
            body: request.body,
        });

        // Let concurrently started calls interleave like real network I/O
        tokio::task::yield_now().await;

        let mut routes = self.routes.lock();
        let response = match routes.get_mut(&(request.method, endpoint)) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or(HttpResponse {
            status: StatusCode::NOT_FOUND,
            body: br#"{"detail":"Not found."}"#.to_vec(),
        }))
    }

    fn cookie(&self, _url: &str, name: &str) -> Option<String> {
        self.cookies.lock().get(name).cloned()
    }
}
