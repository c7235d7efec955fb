//! Service configuration
//!
//! A [`ServiceConfig`] can be written in YAML (or JSON) or assembled from
//! `<SERVICE>_*` environment variables, then turned into the runtime HTTP
//! and auth configuration.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default service name used for environment lookups
pub const DEFAULT_SERVICE_NAME: &str = "cloudant";

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service URL (`https://<account>.cloudantnosqldb.appdomain.cloud`)
    #[serde(default)]
    pub url: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfigDef,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ServiceConfig {
    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Read `<SERVICE>_*` variables from the process environment
    pub fn from_environment(service_name: &str) -> Result<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    ///
    /// The service name is upper-cased and `-` becomes `_`, so `cloudant`
    /// reads `CLOUDANT_URL`, `CLOUDANT_APIKEY` and friends.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}")).none_if_empty();

        let auth = match var("AUTH_TYPE").map(|t| t.to_lowercase()) {
            Some(auth_type) => AuthConfigDef::from_env_type(&auth_type, &var)?,
            None if var("APIKEY").is_some() => AuthConfigDef::from_env_type("iam", &var)?,
            None if var("USERNAME").is_some() => {
                AuthConfigDef::from_env_type("couchdb_session", &var)?
            }
            None => {
                return Err(Error::config(format!(
                    "no credentials found for service '{service_name}' (set {prefix}_AUTH_TYPE)"
                )))
            }
        };

        let mut http = HttpConfig::default();
        if let Some(disable) = var("DISABLE_SSL") {
            http.disable_ssl_verification = parse_bool(&prefix, "DISABLE_SSL", &disable)?;
        }
        if let Some(gzip) = var("ENABLE_GZIP") {
            http.enable_gzip = parse_bool(&prefix, "ENABLE_GZIP", &gzip)?;
        }
        if let Some(retries) = var("ENABLE_RETRIES") {
            if parse_bool(&prefix, "ENABLE_RETRIES", &retries)? {
                http.max_retries = match var("MAX_RETRIES") {
                    Some(max) => parse_number(&prefix, "MAX_RETRIES", &max)?,
                    None => DEFAULT_ENV_MAX_RETRIES,
                };
                if let Some(interval) = var("RETRY_INTERVAL") {
                    let seconds: u64 = parse_number(&prefix, "RETRY_INTERVAL", &interval)?;
                    http.retry_backoff.max_ms = seconds.saturating_mul(1000);
                }
            }
        }

        Ok(Self {
            url: var("URL"),
            auth,
            http,
            headers: HashMap::new(),
        })
    }

    /// Runtime HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            )
            .gzip(self.http.enable_gzip)
            .disable_ssl_verification(self.http.disable_ssl_verification);

        if let Some(url) = &self.url {
            builder = builder.base_url(url.clone());
        }
        if let Some(rate_limit) = &self.http.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }

    /// Runtime auth configuration
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.clone().into()
    }
}

const DEFAULT_ENV_MAX_RETRIES: u32 = 4;

fn parse_bool(prefix: &str, suffix: &str, value: &str) -> Result<bool> {
    value.to_lowercase().parse().map_err(|_| {
        Error::config(format!("{prefix}_{suffix} must be true or false, got '{value}'"))
    })
}

fn parse_number<T: std::str::FromStr>(prefix: &str, suffix: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::config(format!("{prefix}_{suffix} must be a number, got '{value}'")))
}

// ============================================================================
// Auth Config Definition
// ============================================================================

/// Authentication configuration as written in a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfigDef {
    /// No authentication
    #[default]
    #[serde(alias = "noauth")]
    None,

    /// Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    #[serde(alias = "bearertoken")]
    BearerToken {
        /// The token value
        token: String,
    },

    /// IAM API key
    Iam {
        /// The API key
        apikey: String,
        /// Token service URL
        #[serde(default)]
        url: Option<String>,
        /// Client id for the token request
        #[serde(default)]
        client_id: Option<String>,
        /// Client secret for the token request
        #[serde(default)]
        client_secret: Option<String>,
        /// Requested scope
        #[serde(default)]
        scope: Option<String>,
    },

    /// CouchDB session cookie
    CouchdbSession {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfigDef {
    fn from_env_type<F>(auth_type: &str, var: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |suffix: &str| {
            var(suffix).ok_or_else(|| {
                Error::config(format!("{auth_type} authentication requires {suffix}"))
            })
        };

        match auth_type {
            "noauth" | "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic {
                username: required("USERNAME")?,
                password: required("PASSWORD")?,
            }),
            "bearertoken" | "bearer_token" => Ok(Self::BearerToken {
                token: required("BEARER_TOKEN")?,
            }),
            "iam" => Ok(Self::Iam {
                apikey: required("APIKEY")?,
                url: var("AUTH_URL"),
                client_id: var("CLIENT_ID"),
                client_secret: var("CLIENT_SECRET"),
                scope: var("SCOPE"),
            }),
            "couchdb_session" => Ok(Self::CouchdbSession {
                username: required("USERNAME")?,
                password: required("PASSWORD")?,
            }),
            other => Err(Error::config(format!("unsupported auth type '{other}'"))),
        }
    }
}

impl From<AuthConfigDef> for AuthConfig {
    fn from(def: AuthConfigDef) -> Self {
        match def {
            AuthConfigDef::None => AuthConfig::None,
            AuthConfigDef::Basic { username, password } => AuthConfig::Basic { username, password },
            AuthConfigDef::BearerToken { token } => AuthConfig::Bearer { token },
            AuthConfigDef::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            },
            AuthConfigDef::CouchdbSession { username, password } => {
                AuthConfig::CouchDbSession { username, password }
            }
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries (0 disables retries)
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client side rate limiting
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Request gzip responses
    #[serde(default = "default_true")]
    pub enable_gzip: bool,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub disable_ssl_verification: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: 0,
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
            enable_gzip: true,
            disable_ssl_verification: false,
        }
    }
}

fn default_timeout() -> u64 {
    150
}

fn default_true() -> bool {
    true
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_env_iam() {
        let config = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[
                ("CLOUDANT_URL", "https://acct.cloudant.com"),
                ("CLOUDANT_AUTH_TYPE", "IAM"),
                ("CLOUDANT_APIKEY", "key"),
                ("CLOUDANT_AUTH_URL", "https://iam.test.cloud.ibm.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.url.as_deref(), Some("https://acct.cloudant.com"));
        match config.auth_config() {
            AuthConfig::Iam { apikey, url, .. } => {
                assert_eq!(apikey, "key");
                assert_eq!(url.as_deref(), Some("https://iam.test.cloud.ibm.com"));
            }
            other => panic!("unexpected auth: {other:?}"),
        }
    }

    #[test]
    fn test_from_env_service_name_normalized() {
        let config = ServiceConfig::from_lookup(
            "my-cloudant",
            lookup(&[
                ("MY_CLOUDANT_AUTH_TYPE", "basic"),
                ("MY_CLOUDANT_USERNAME", "admin"),
                ("MY_CLOUDANT_PASSWORD", "pass"),
            ]),
        )
        .unwrap();

        assert!(matches!(config.auth_config(), AuthConfig::Basic { .. }));
    }

    #[test]
    fn test_from_env_defaults_auth_type() {
        let iam = ServiceConfig::from_lookup("cloudant", lookup(&[("CLOUDANT_APIKEY", "k")]))
            .unwrap();
        assert_eq!(iam.auth_config().auth_type(), "iam");

        let session = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[("CLOUDANT_USERNAME", "u"), ("CLOUDANT_PASSWORD", "p")]),
        )
        .unwrap();
        assert_eq!(session.auth_config().auth_type(), "couchdb_session");

        assert!(ServiceConfig::from_lookup("cloudant", lookup(&[])).is_err());
    }

    #[test]
    fn test_from_env_missing_credential() {
        let err = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[("CLOUDANT_AUTH_TYPE", "basic"), ("CLOUDANT_USERNAME", "u")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("PASSWORD"));
    }

    #[test]
    fn test_from_env_unsupported_type() {
        let err = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[("CLOUDANT_AUTH_TYPE", "container")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("container"));
    }

    #[test]
    fn test_from_env_http_options() {
        let config = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[
                ("CLOUDANT_AUTH_TYPE", "noauth"),
                ("CLOUDANT_DISABLE_SSL", "true"),
                ("CLOUDANT_ENABLE_GZIP", "false"),
                ("CLOUDANT_ENABLE_RETRIES", "true"),
                ("CLOUDANT_MAX_RETRIES", "7"),
                ("CLOUDANT_RETRY_INTERVAL", "5"),
            ]),
        )
        .unwrap();

        let http = config.http_client_config();
        assert!(http.disable_ssl_verification);
        assert!(!http.enable_gzip);
        assert_eq!(http.max_retries, 7);
        assert_eq!(http.max_backoff, Duration::from_secs(5));
    }

    #[test]
    fn test_from_env_huge_retry_interval_saturates() {
        let config = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[
                ("CLOUDANT_AUTH_TYPE", "noauth"),
                ("CLOUDANT_ENABLE_RETRIES", "true"),
                ("CLOUDANT_RETRY_INTERVAL", "18446744073709551615"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.retry_backoff.max_ms, u64::MAX);
        assert_eq!(config.http_client_config().max_backoff, Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_from_env_bad_bool() {
        let err = ServiceConfig::from_lookup(
            "cloudant",
            lookup(&[("CLOUDANT_AUTH_TYPE", "noauth"), ("CLOUDANT_DISABLE_SSL", "yes")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
url: https://acct.cloudant.com
auth:
  type: couchdb_session
  username: admin
  password: secret
http:
  timeout_seconds: 20
  max_retries: 2
  retry_backoff:
    type: linear
    initial_ms: 50
    max_ms: 500
  rate_limit:
    requests_per_second: 5
    burst_size: 5
headers:
  X-Team: storage
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        let http = config.http_client_config();

        assert_eq!(http.base_url.as_deref(), Some("https://acct.cloudant.com"));
        assert_eq!(http.timeout, Duration::from_secs(20));
        assert_eq!(http.max_retries, 2);
        assert_eq!(http.backoff_type, BackoffType::Linear);
        assert_eq!(http.initial_backoff, Duration::from_millis(50));
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(5, 5)));
        assert_eq!(
            http.default_headers.get("X-Team").map(String::as_str),
            Some("storage")
        );
        assert_eq!(config.auth_config().auth_type(), "couchdb_session");
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = ServiceConfig::from_yaml_str("url: http://localhost:5984\n").unwrap();
        assert!(matches!(config.auth, AuthConfigDef::None));
        assert_eq!(config.http.timeout_seconds, 150);
        assert_eq!(config.http.max_retries, 0);
        assert!(config.http.enable_gzip);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://localhost:5984").unwrap();
        writeln!(file, "auth:").unwrap();
        writeln!(file, "  type: bearertoken").unwrap();
        writeln!(file, "  token: abc").unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.auth_config(), AuthConfig::Bearer { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ServiceConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
