//! Cloudant V1 service
//!
//! [`CloudantV1`] exposes one async method per REST endpoint. Each method
//! takes an options struct, checks its required fields before any I/O,
//! resolves the path template and hands the request to the shared
//! [`HttpClient`] pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudant_sdk::cloudant::{CloudantV1, GetDocumentOptions};
//! use cloudant_sdk::AuthConfig;
//!
//! let service = CloudantV1::new("https://account.cloudantnosqldb.appdomain.cloud", AuthConfig::iam("apikey"))?;
//! let doc = service
//!     .get_document(&GetDocumentOptions::new("products", "small-appliances:1000042"))
//!     .await?;
//! ```

/// Generates a fluent setter for each optional field plus `header()`.
macro_rules! option_setters {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl $name {
            $(
                #[doc = concat!("Set `", stringify!($field), "`")]
                #[must_use]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Add a request header
            #[must_use]
            pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.headers.insert(key.into(), value.into());
                self
            }
        }
    };
}

mod attachments;
mod changes;
mod database_details;
mod databases;
mod design_documents;
mod documents;
mod geospatial;
mod local_documents;
mod partitions;
mod queries;
mod replication;
mod searches;
mod security;
mod server;
mod views;

pub use attachments::*;
pub use changes::*;
pub use database_details::*;
pub use databases::*;
pub use design_documents::*;
pub use documents::*;
pub use geospatial::*;
pub use local_documents::*;
pub use partitions::*;
pub use queries::*;
pub use replication::*;
pub use searches::*;
pub use security::*;
pub use server::*;
pub use views::*;

use crate::auth::{AuthConfig, Authenticate, Authenticator};
use crate::config::{ServiceConfig, DEFAULT_SERVICE_NAME};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestBuilder};
use crate::types::StringMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Service URL used when none is configured
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5984";

const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";
const SERVICE_VERSION: &str = "V1";

/// Client for the Cloudant V1 API
#[derive(Clone, Debug)]
pub struct CloudantV1 {
    http: HttpClient,
    service_url: String,
}

impl CloudantV1 {
    /// Create a service with the built-in authenticator and default HTTP settings
    pub fn new(service_url: impl Into<String>, auth: AuthConfig) -> Result<Self> {
        Self::with_auth_config(service_url, auth, HttpClientConfig::default())
    }

    /// Create a service with the built-in authenticator and custom HTTP settings.
    ///
    /// Token and session requests use the same timeout, TLS and gzip settings
    /// as data requests.
    pub fn with_auth_config(service_url: impl Into<String>, auth: AuthConfig, config: HttpClientConfig) -> Result<Self> {
        auth.validate()?;
        let authenticator = Arc::new(Authenticator::with_client(auth, config.build_client()?));
        Self::with_authenticator(service_url, authenticator, config)
    }

    /// Create a service with a caller supplied authenticator
    pub fn with_authenticator(
        service_url: impl Into<String>,
        authenticator: Arc<dyn Authenticate>,
        config: HttpClientConfig,
    ) -> Result<Self> {
        let service_url = normalize_url(&service_url.into())?;
        authenticator.set_service_url(&service_url);

        let mut http = HttpClient::with_auth(config, authenticator)?;
        http.set_base_url(service_url.clone());

        debug!(url = %service_url, "Created Cloudant service");
        Ok(Self { http, service_url })
    }

    /// Create a service from a [`ServiceConfig`]
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let url = config.url.clone().unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        Self::with_auth_config(url, config.auth_config(), config.http_client_config())
    }

    /// Create a service from `<SERVICE_NAME>_*` environment variables.
    ///
    /// An empty name means `cloudant`.
    pub fn new_from_environment(service_name: &str) -> Result<Self> {
        let name = if service_name.is_empty() {
            DEFAULT_SERVICE_NAME
        } else {
            service_name
        };
        Self::from_config(&ServiceConfig::from_environment(name)?)
    }

    /// Current service URL
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Point the service at another URL
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        let url = normalize_url(url)?;
        if let Some(auth) = self.http.authenticator() {
            auth.set_service_url(&url);
        }
        self.http.set_base_url(url.clone());
        self.service_url = url;
        Ok(())
    }

    /// Replace the headers sent with every request
    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.http.set_default_headers(headers);
    }

    /// Retry 429 and transient 5xx responses up to `max_retries` times.
    ///
    /// `max_interval` caps the delay between attempts; zero keeps the current cap.
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.http.enable_retries(max_retries, max_interval);
    }

    /// Stop retrying failed requests
    pub fn disable_retries(&mut self) {
        self.http.disable_retries();
    }

    /// The underlying request pipeline
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Start a request carrying the SDK headers and the caller's headers
    fn request(
        &self,
        operation_id: &str,
        method: Method,
        template: &str,
        params: &[(&str, &str)],
        headers: &StringMap,
    ) -> Result<RequestBuilder> {
        let builder = RequestBuilder::new(method, template, params)?
            .header(
                SDK_ANALYTICS_HEADER,
                format!(
                    "service_name={DEFAULT_SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation_id}"
                ),
            )
            .header("Accept", "application/json");

        debug!(operation = operation_id, method = %builder.method, path = %builder.path, "Preparing request");
        Ok(builder.headers(headers))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.http.execute_json(&request).await
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(Error::validation("service_url"));
    }
    url::Url::parse(url)?;
    Ok(url.trim_end_matches('/').to_string())
}

/// Reject empty required string parameters before any I/O
fn require(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.is_empty() {
            return Err(Error::validation(*name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
