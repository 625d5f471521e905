//! # Upstream HTTP Client
//!
//! Client wrapper for the Indodax public API with bounded timeouts and a
//! single-shot retry policy: timeouts and 5xx responses get exactly one retry
//! with a longer timeout and a reduced header set; 4xx and network failures
//! surface immediately. There is no backoff, no circuit breaker, and no retry
//! budget shared across requests.

use crate::config::Config;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT_VALUE: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

const PRIMARY_TIMEOUT: Duration = Duration::from_secs(8);
const RETRY_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upstream path probed by the health endpoint.
const PROBE_PATH: &str = "/api/server_time";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream returned server error status {0}")]
    Server(u16),

    #[error("upstream returned client error status {0}")]
    Client(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("retry failed: {0}")]
    RetryExhausted(#[source] Box<FetchError>),

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl FetchError {
    /// Timeouts and 5xx responses are the only transient classes.
    fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Timeout | FetchError::Server(_))
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Timeout => true,
            FetchError::RetryExhausted(inner) => inner.is_timeout(),
            _ => false,
        }
    }
}

/// HTTP client for the upstream exchange API.
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if config.insecure_upstream_tls {
            warn!("[UPSTREAM] TLS certificate verification is DISABLED");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.clone(),
        })
    }

    /// Fetch a path relative to the upstream base URL.
    pub async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch_url(&url, query).await
    }

    /// Fetch an absolute URL with the same retry policy.
    ///
    /// Used by the generic proxy endpoint after its domain check.
    pub async fn fetch_url(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        match self.attempt(url, query, PRIMARY_TIMEOUT, false).await {
            Ok(payload) => Ok(payload),
            Err(e) if e.is_retryable() => {
                warn!("[UPSTREAM] {} failed ({}), retrying once", url, e);
                self.attempt(url, query, RETRY_TIMEOUT, true)
                    .await
                    .map_err(|retry_err| FetchError::RetryExhausted(Box::new(retry_err)))
            }
            Err(e) => Err(e),
        }
    }

    /// One bounded-timeout probe of a known-good upstream path.
    ///
    /// Returns the round-trip time in milliseconds. No retry; the health
    /// endpoint reports the failure as degraded connectivity instead.
    pub async fn probe(&self) -> Result<u128, FetchError> {
        let url = format!("{}{}", self.base_url, PROBE_PATH);
        let started = std::time::Instant::now();
        self.attempt(&url, &[], PROBE_TIMEOUT, true).await?;
        Ok(started.elapsed().as_millis())
    }

    /// Single GET attempt. `minimal_headers` drops the browser-simulation
    /// extras, keeping only User-Agent and Accept.
    async fn attempt(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
        minimal_headers: bool,
    ) -> Result<Value, FetchError> {
        debug!("[UPSTREAM] GET {} (timeout {:?})", url, timeout);

        let mut request = self
            .http
            .get(url)
            .timeout(timeout)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json");

        if !minimal_headers {
            request = request
                .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .header(REFERER, &self.base_url);
        }

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::Server(status.as_u16()));
        }
        if !status.is_success() {
            return Err(FetchError::Client(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
