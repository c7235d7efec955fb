//! HTTP client with retry and rate limiting
//!
//! Provides the request pipeline shared by every service operation:
//! - Automatic retries with configurable backoff (disabled by default)
//! - Optional client side rate limiting
//! - Authentication through a pluggable [`Authenticate`] implementation
//! - Gzip response decompression
//! - Error classification for retry decisions

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::request::{RequestBody, RequestBuilder};
use super::response::{BinaryResponse, ByteStream, HeadResponse};
use crate::auth::Authenticate;
use crate::error::{is_retryable_status, Error, Result};
use crate::types::BackoffType;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries (0 disables retries)
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff, also caps `Retry-After`
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Ask for and transparently decode gzip responses
    pub enable_gzip: bool,
    /// Accept invalid TLS certificates
    pub disable_ssl_verification: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(150),
            max_retries: 0,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            backoff_type: BackoffType::Exponential,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("cloudant-sdk/{}", env!("CARGO_PKG_VERSION")),
            enable_gzip: true,
            disable_ssl_verification: false,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable or disable gzip responses
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.config.enable_gzip = enabled;
        self
    }

    /// Accept invalid TLS certificates
    pub fn disable_ssl_verification(mut self, disabled: bool) -> Self {
        self.config.disable_ssl_verification = disabled;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

impl HttpClientConfig {
    /// A reqwest client with this config's timeout, TLS and gzip settings
    pub fn build_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(self.enable_gzip)
            .danger_accept_invalid_certs(self.disable_ssl_verification)
            .build()?)
    }
}

/// HTTP client with retry and rate limiting
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Arc<dyn Authenticate>>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = config.build_client()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, authenticator: Arc<dyn Authenticate>) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.authenticator = Some(authenticator);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, authenticator: Arc<dyn Authenticate>) {
        self.authenticator = Some(authenticator);
    }

    /// The configured authenticator
    pub fn authenticator(&self) -> Option<&Arc<dyn Authenticate>> {
        self.authenticator.as_ref()
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Current configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Change the base URL
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.config.base_url = Some(url.into());
    }

    /// Replace the default headers
    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.config.default_headers = headers;
    }

    /// Turn on retries
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.config.max_retries = max_retries;
        if !max_interval.is_zero() {
            self.config.max_backoff = max_interval;
        }
    }

    /// Turn off retries
    pub fn disable_retries(&mut self) {
        self.config.max_retries = 0;
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send a request, retrying according to the configured policy.
    ///
    /// Any status outside 2xx that survives the retries becomes
    /// [`Error::Service`].
    pub async fn execute(&self, request: &RequestBuilder) -> Result<Response> {
        let full_url = self.build_url(&request.path);
        let max_retries = self.config.max_retries;
        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let headers = self.build_headers(request)?;

        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self
                .client
                .request(request.method.clone(), &full_url)
                .headers(headers.clone())
                .timeout(timeout);

            if !request.query.is_empty() {
                req = req.query(&request.query);
            }

            match &request.body {
                RequestBody::Empty => {}
                RequestBody::Json(data) | RequestBody::Raw { data, .. } => {
                    req = req.body(data.clone());
                }
            }

            if let Some(ref auth) = self.authenticator {
                req = auth.authenticate(req).await?;
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        debug!(
                            method = %request.method,
                            url = %full_url,
                            status = status.as_u16(),
                            "Request succeeded"
                        );
                        return Ok(response);
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = retry_after(&response)
                            .map_or_else(|| self.calculate_backoff(attempt), |d| {
                                d.min(self.config.max_backoff)
                            });
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::service(status.as_u16(), String::new()));
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    debug!(
                        method = %request.method,
                        url = %full_url,
                        status = status.as_u16(),
                        "Request failed"
                    );
                    return Err(Error::service(status.as_u16(), body));
                }
                Err(e) => {
                    if e.is_timeout() {
                        if attempt < max_retries {
                            let delay = self.calculate_backoff(attempt);
                            warn!(
                                "Request timeout, attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                max_retries + 1,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            last_error = Some(Error::Timeout {
                                timeout_ms: timeout.as_millis() as u64,
                            });
                            continue;
                        }
                        return Err(Error::Timeout {
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }

                    if e.is_connect() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Send a request and parse the JSON response
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| Error::decode(e.to_string()))
    }

    /// Send a HEAD request, keeping only status and headers
    pub async fn execute_head(&self, request: &RequestBuilder) -> Result<HeadResponse> {
        let response = self.execute(request).await?;
        Ok(HeadResponse {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
        })
    }

    /// Send a request and buffer the raw body
    pub async fn execute_bytes(&self, request: &RequestBuilder) -> Result<BinaryResponse> {
        let response = self.execute(request).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(BinaryResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a request and hand back the body as a byte stream
    pub async fn execute_stream(&self, request: &RequestBuilder) -> Result<ByteStream> {
        let response = self.execute(request).await?;
        Ok(response.bytes_stream().map(|chunk| chunk.map_err(Error::Http)).boxed())
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Default headers first, request headers override them
    fn build_headers(&self, request: &RequestBuilder) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let defaults = self.config.default_headers.iter();
        let specific = request.headers.iter().map(|(k, v)| (k, v));

        for (key, value) in defaults.chain(specific) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            headers.insert(name, value);
        }

        let content_type = match &request.body {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Raw { content_type, .. } => Some(content_type.as_str()),
        };
        if let Some(content_type) = content_type {
            if !headers.contains_key(CONTENT_TYPE) {
                let value = HeaderValue::from_str(content_type)
                    .map_err(|e| Error::invalid_value("Content-Type", e.to_string()))?;
                headers.insert(CONTENT_TYPE, value);
            }
        }

        Ok(headers)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field(
                "auth_type",
                &self.authenticator.as_ref().map(|a| a.auth_type()),
            )
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Extract the `Retry-After` header value (seconds form)
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
