use super::{find_cookie, FormValue, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// reqwest-backed transport with a shared cookie jar
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .user_agent(concat!("storefront-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client, jar })
    }

    /// Seed the jar, e.g. with a session cookie copied from a browser
    pub fn add_cookie(&self, url: &str, cookie: &str) -> AppResult<()> {
        let url = parse_url(url)?;
        self.jar.add_cookie_str(cookie, &url);
        Ok(())
    }

    fn build_form(parts: Vec<super::FormPart>) -> AppResult<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part.value {
                FormValue::Text(text) => form.text(part.name, text),
                FormValue::File {
                    file_name,
                    mime,
                    data,
                } => {
                    let mut file = Part::bytes(data).file_name(file_name);
                    if let Some(mime) = mime {
                        file = file.mime_str(&mime)?;
                    }
                    form.part(part.name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), &request.url)
            .headers(request.headers);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            "Backend responded"
        );

        Ok(HttpResponse { status, body })
    }

    fn cookie(&self, url: &str, name: &str) -> Option<String> {
        let url = parse_url(url).ok()?;
        let header = self.jar.cookies(&url)?;
        find_cookie(header.to_str().ok()?, name)
    }
}

fn parse_url(url: &str) -> AppResult<Url> {
    Url::parse(url).map_err(|e| AppError::Config(format!("Invalid URL {}: {}", url, e)))
}
