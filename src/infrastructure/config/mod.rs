use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend origin, e.g. `https://shop.example.com` (no `/api` suffix)
    pub backend_base_url: String,
    pub token_file: PathBuf,
    pub cache_ttl_ms: i64,
    // Payment polling
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
    pub poll_max_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            backend_base_url: env::var("STOREFRONT_BACKEND_URL")?
                .trim_end_matches('/')
                .to_string(),
            token_file: env::var("STOREFRONT_TOKEN_FILE")
                .unwrap_or_else(|_| ".storefront/tokens.json".to_string())
                .into(),
            cache_ttl_ms: env::var("STOREFRONT_CACHE_TTL_MS")
                .unwrap_or_else(|_| "60000".to_string())
                .parse()?,
            poll_interval_ms: env::var("STOREFRONT_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            poll_max_attempts: env::var("STOREFRONT_POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            poll_max_backoff_ms: env::var("STOREFRONT_POLL_MAX_BACKOFF_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()?,
            request_timeout_secs: env::var("STOREFRONT_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    /// Config with defaults for everything but the backend URL
    pub fn for_backend(backend_base_url: &str) -> Self {
        Self {
            backend_base_url: backend_base_url.trim_end_matches('/').to_string(),
            token_file: PathBuf::from(".storefront/tokens.json"),
            cache_ttl_ms: 60_000,
            poll_interval_ms: 3_000,
            poll_max_attempts: 20,
            poll_max_backoff_ms: 30_000,
            request_timeout_secs: 30,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
        }
    }

    /// Base URL of every API call: `<backend>/api`
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.backend_base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "storefront_client=debug"
        } else {
            "storefront_client=info"
        }
    }
}
