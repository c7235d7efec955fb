//! Error types for the Cloudant SDK
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Errors raised while validating options never touch the network; every
//! other variant comes out of the request pipeline.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for the Cloudant SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Missing required parameter: {field}")]
    Validation { field: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", describe_service_error(.error, .reason, .body))]
    Service {
        status: u16,
        error: Option<String>,
        reason: Option<String>,
        body: String,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing required parameter error
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build a service error from a non-2xx response body.
    ///
    /// CouchDB answers failures with `{"error": "...", "reason": "..."}`;
    /// both are lifted out when the body has that shape.
    pub fn service(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let parsed: Option<CouchErrorBody> = serde_json::from_str(&body).ok();
        let (error, reason) = match parsed {
            Some(parsed) => (parsed.error, parsed.reason),
            None => (None, None),
        };
        Self::Service {
            status,
            error,
            reason,
            body,
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for errors raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::InvalidValue { .. })
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::Service { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

#[derive(Deserialize)]
struct CouchErrorBody {
    error: Option<String>,
    reason: Option<String>,
}

fn describe_service_error(error: &Option<String>, reason: &Option<String>, body: &str) -> String {
    match (error, reason) {
        (Some(error), Some(reason)) => format!("{error}: {reason}"),
        (Some(error), None) => error.clone(),
        _ => body.to_string(),
    }
}

/// Check if an HTTP status code is retryable.
///
/// 501 Not Implemented is a 5xx that will never succeed on retry.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the Cloudant SDK
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::validation("db");
        assert_eq!(err.to_string(), "Missing required parameter: db");

        let err = Error::service(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_service_error_parses_couch_body() {
        let err = Error::service(404, r#"{"error":"not_found","reason":"missing"}"#);
        assert_eq!(err.to_string(), "HTTP 404: not_found: missing");
        match err {
            Error::Service { error, reason, .. } => {
                assert_eq!(error.as_deref(), Some("not_found"));
                assert_eq!(reason.as_deref(), Some("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::service(409, "").status(), Some(409));
        assert_eq!(Error::service(429, "").status(), Some(429));
        assert_eq!(Error::validation("db").status(), None);
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::service(429, "").is_retryable());
        assert!(Error::service(500, "").is_retryable());
        assert!(Error::service(503, "").is_retryable());

        assert!(!Error::service(501, "").is_retryable());
        assert!(!Error::service(400, "").is_retryable());
        assert!(!Error::service(404, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::validation("db").is_retryable());
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::validation("doc_id").is_validation());
        assert!(Error::invalid_value("db", "empty").is_validation());
        assert!(!Error::service(400, "").is_validation());
    }
}
