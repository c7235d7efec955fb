//! Auth configuration types
//!
//! These types represent the runtime auth configuration after the service
//! configuration (YAML, environment or code) has been resolved.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};

/// Default IAM token service
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Static bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// IBM Cloud IAM API key, exchanged for short-lived access tokens
    Iam {
        /// The IAM API key
        apikey: String,
        /// Token service base URL (defaults to `https://iam.cloud.ibm.com`)
        url: Option<String>,
        /// Optional client id for the token request
        client_id: Option<String>,
        /// Optional client secret for the token request
        client_secret: Option<String>,
        /// Optional space separated scope
        scope: Option<String>,
    },

    /// CouchDB cookie session obtained from `POST /_session`
    CouchDbSession {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfig {
    /// Create an IAM config with the default token service
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Create a basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a CouchDB session config
    pub fn couchdb_session(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::CouchDbSession {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Name of the auth type, as used by `<SERVICE>_AUTH_TYPE`
    pub fn auth_type(&self) -> &'static str {
        match self {
            AuthConfig::None => "noauth",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearertoken",
            AuthConfig::Iam { .. } => "iam",
            AuthConfig::CouchDbSession { .. } => "couchdb_session",
        }
    }

    /// Check that required credentials are present and well formed
    pub fn validate(&self) -> Result<()> {
        match self {
            AuthConfig::None => Ok(()),
            AuthConfig::Basic { username, password }
            | AuthConfig::CouchDbSession { username, password } => {
                check_credential("username", username)?;
                check_credential("password", password)
            }
            AuthConfig::Bearer { token } => check_credential("bearer_token", token),
            AuthConfig::Iam {
                apikey,
                client_id,
                client_secret,
                ..
            } => {
                check_credential("apikey", apikey)?;
                if client_id.is_some() != client_secret.is_some() {
                    return Err(Error::auth(
                        "client_id and client_secret must be provided together",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Credentials must be non-empty and not wrapped in braces or quotes,
/// a common copy/paste mistake from templated config files.
fn check_credential(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::auth(format!("{name} cannot be empty")));
    }
    let wrapped = (value.starts_with('{') && value.ends_with('}'))
        || (value.starts_with('"') && value.ends_with('"'));
    if wrapped {
        return Err(Error::auth(format!(
            "{name} cannot start or end with curly brackets or quotes"
        )));
    }
    Ok(())
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token (or session cookie value)
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now.
    ///
    /// A lifetime past the end of the calendar never expires; one before
    /// its start is already expired.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let now = Utc::now();
        let expires_at = TimeDelta::try_seconds(seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .or_else(|| (seconds < 0).then_some(now));
        Self { token, expires_at }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = TimeDelta::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_buffer_is_expired() {
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_out_of_range_lifetimes() {
        let forever = CachedToken::expires_in("test".to_string(), i64::MAX);
        assert!(forever.expires_at.is_none());
        assert!(!forever.is_expired());

        let long_gone = CachedToken::expires_in("test".to_string(), i64::MIN);
        assert!(long_gone.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
        assert_eq!(config.auth_type(), "noauth");
    }

    #[test]
    fn test_validate_rejects_empty_and_wrapped() {
        assert!(AuthConfig::basic("", "pw").validate().is_err());
        assert!(AuthConfig::basic("{user}", "pw").validate().is_err());
        assert!(AuthConfig::iam("\"key\"").validate().is_err());
        assert!(AuthConfig::basic("user", "pw").validate().is_ok());
        assert!(AuthConfig::iam("key").validate().is_ok());
    }

    #[test]
    fn test_validate_iam_client_pair() {
        let config = AuthConfig::Iam {
            apikey: "key".to_string(),
            url: None,
            client_id: Some("bx".to_string()),
            client_secret: None,
            scope: None,
        };
        assert!(config.validate().is_err());
    }
}
