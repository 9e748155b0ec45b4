//! Rate-limit-aware HTTP request executor.
//!
//! ### Request Shape
//! - `Authorization: Bearer <token>` when the descriptor carries a token
//! - `Content-Type: application/json` on every attempt
//!
//! ### Throttling
//! - 429 and the CDN's 1015 block status are retried with the same descriptor.
//! - The wait comes from `Retry-After` (whole seconds), else a 5s default.
//! - No retry limit. Each wait and each send can be abandoned through a
//!   `CancellationToken`.
//!
//! ### Failures
//! - Transport errors propagate immediately and are never retried.
//! - Any other non-200 status fails with the raw response body.
//! - Bodies larger than `max_bytes` are rejected.

pub mod backoff;

use bytes::Bytes;
use reqwest::{Client, Method, StatusCode, header};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::genius::GeniusError;
use versefetch_core::AppConfig;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "versefetch/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Wait for throttled responses without `Retry-After` (default: 5s)
    pub retry_after_default: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "versefetch/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            retry_after_default: backoff::DEFAULT_RETRY_AFTER,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            retry_after_default: config.retry_after_default(),
        }
    }
}

/// One logical HTTP call. Replayed verbatim on every retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub token: Option<String>,
}

impl RequestDescriptor {
    /// Unauthenticated GET with no query parameters.
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::GET, url: url.into(), query: Vec::new(), token: None }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a bearer token.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// HTTP client that transparently waits out rate limiting.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, GeniusError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { http, config })
    }

    /// Execute a request, returning the full body of the 200 response.
    ///
    /// Throttled responses are retried until a different status arrives or
    /// `cancel` fires.
    pub async fn execute(&self, request: &RequestDescriptor, cancel: &CancellationToken) -> Result<Bytes, GeniusError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let mut builder = self
                .http
                .request(request.method.clone(), request.url.as_str())
                .query(&request.query)
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(token) = &request.token {
                builder = builder.bearer_auth(token);
            }

            tracing::debug!(url = %request.url, attempt, "sending request");

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GeniusError::Cancelled),
                sent = builder.send() => sent?,
            };

            let status = response.status();

            if backoff::is_throttled(status.as_u16()) {
                let delay = backoff::retry_after(response.headers(), self.config.retry_after_default);
                tracing::warn!(
                    url = %request.url,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    attempt,
                    "throttled, retrying after backoff"
                );

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(GeniusError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
                continue;
            }

            if status != StatusCode::OK {
                let url = response.url().to_string();
                let body = response.text().await?;
                tracing::debug!(%url, status = status.as_u16(), "upstream error");
                return Err(GeniusError::Upstream { status: status.as_u16(), url, body });
            }

            if let Some(len) = response.content_length()
                && len as usize > self.config.max_bytes
            {
                return Err(GeniusError::TooLarge { size: len as usize, limit: self.config.max_bytes });
            }

            let bytes = response.bytes().await?;

            if bytes.len() > self.config.max_bytes {
                return Err(GeniusError::TooLarge { size: bytes.len(), limit: self.config.max_bytes });
            }

            tracing::debug!(url = %request.url, bytes = bytes.len(), attempt, "request succeeded");

            return Ok(bytes);
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
