//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken, DEFAULT_IAM_URL};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::{Arc, RwLock as StdRwLock};
use tokio::sync::RwLock;
use tracing::debug;

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const SESSION_COOKIE: &str = "AuthSession";

/// Something that can put credentials on an outgoing request.
///
/// The service holds an `Arc<dyn Authenticate>`, so callers with their own
/// token source can plug it in instead of the built-in [`Authenticator`].
#[async_trait]
pub trait Authenticate: Send + Sync {
    /// Short name of the scheme (`iam`, `basic`, ...)
    fn auth_type(&self) -> &'static str;

    /// Apply credentials to a request
    async fn authenticate(&self, req: RequestBuilder) -> Result<RequestBuilder>;

    /// Called when the service URL changes
    fn set_service_url(&self, _url: &str) {}
}

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached IAM token or session cookie
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
    /// Service URL, needed to reach `/_session`
    service_url: StdRwLock<Option<String>>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
            service_url: StdRwLock::new(None),
        }
    }

    /// Set the service URL used for session login
    #[must_use]
    pub fn with_service_url(self, url: impl Into<String>) -> Self {
        Authenticate::set_service_url(&self, &url.into());
        self
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => {
                self.fetch_iam_token(
                    apikey,
                    url.as_deref().unwrap_or(DEFAULT_IAM_URL),
                    client_id.as_deref().zip(client_secret.as_deref()),
                    scope.as_deref(),
                )
                .await
            }

            AuthConfig::CouchDbSession { username, password } => {
                self.fetch_session_cookie(username, password).await
            }

            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Exchange the API key for an IAM access token
    async fn fetch_iam_token(
        &self,
        apikey: &str,
        iam_url: &str,
        client: Option<(&str, &str)>,
        scope: Option<&str>,
    ) -> Result<CachedToken> {
        let token_url = format!("{}/identity/token", iam_url.trim_end_matches('/'));
        let mut form = vec![
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);
        if let Some((id, secret)) = client {
            req = req.basic_auth(id, Some(secret));
        }

        debug!(url = %token_url, "Requesting IAM access token");
        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("IAM token request failed with status {status}: {body}"),
            });
        }

        let token_response: IamTokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Log in to `/_session` and keep the `AuthSession` cookie
    async fn fetch_session_cookie(&self, username: &str, password: &str) -> Result<CachedToken> {
        let base = self
            .service_url
            .read()
            .map_err(|_| Error::auth("service URL lock poisoned"))?
            .clone()
            .ok_or_else(|| Error::auth("CouchDB session auth requires a service URL"))?;
        let session_url = format!("{}/_session", base.trim_end_matches('/'));

        debug!(url = %session_url, "Requesting CouchDB session");
        let response = self
            .http_client
            .post(&session_url)
            .header("Accept", "application/json")
            .form(&[("name", username), ("password", password)])
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth {
                message: format!("Session request failed with status {status}: {body}"),
            });
        }

        parse_session_cookie(response.headers())
            .ok_or_else(|| Error::auth("Session response did not set an AuthSession cookie"))
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[async_trait]
impl Authenticate for Authenticator {
    fn auth_type(&self) -> &'static str {
        self.config.auth_type()
    }

    async fn authenticate(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }

            AuthConfig::CouchDbSession { .. } => {
                let cookie = self.get_or_refresh_token().await?;
                Ok(req.header(COOKIE, format!("{SESSION_COOKIE}={cookie}")))
            }
        }
    }

    fn set_service_url(&self, url: &str) {
        if let Ok(mut guard) = self.service_url.write() {
            *guard = Some(url.to_string());
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_type", &self.config.auth_type())
            .finish_non_exhaustive()
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry, unix seconds
    #[serde(default)]
    expiration: Option<i64>,
}

impl IamTokenResponse {
    fn into_cached_token(self) -> CachedToken {
        if let Some(expiration) = self.expiration {
            let seconds = expiration.saturating_sub(Utc::now().timestamp());
            return CachedToken::expires_in(self.access_token, seconds);
        }
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}

/// Pull `AuthSession` and its `Max-Age` out of the `Set-Cookie` headers
pub(crate) fn parse_session_cookie(headers: &HeaderMap) -> Option<CachedToken> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(cookie) = value.to_str() else {
            continue;
        };
        let mut parts = cookie.split(';').map(str::trim);
        let Some((name, token)) = parts.next().and_then(|p| p.split_once('=')) else {
            continue;
        };
        if name != SESSION_COOKIE {
            continue;
        }
        let max_age = parts
            .filter_map(|p| p.split_once('='))
            .find(|(k, _)| k.eq_ignore_ascii_case("max-age"))
            .and_then(|(_, v)| v.parse::<i64>().ok());
        return Some(match max_age {
            Some(secs) => CachedToken::expires_in(token.to_string(), secs),
            None => CachedToken::new(token.to_string(), None),
        });
    }
    None
}
