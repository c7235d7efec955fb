//! Sessions, permissions, API keys and CORS

use super::replication::UserContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /_session`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInformation {
    pub ok: bool,
    pub info: SessionInfo,
    #[serde(rename = "userCtx")]
    pub user_ctx: UserContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_db: Option<String>,
    #[serde(default)]
    pub authentication_handlers: Vec<String>,
}

/// A database `_security` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Security {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<SecurityObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<SecurityObject>,
    /// Cloudant permissions by user or API key, e.g. `_reader`, `_writer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudant: Option<HashMap<String, Vec<String>>>,
    /// Only allow `_users` database authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couchdb_auth_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Response of `POST /_api/v2/api_keys`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeysResult {
    pub ok: bool,
    pub key: String,
    pub password: String,
}

/// Account CORS configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsInformation {
    pub allow_credentials: bool,
    pub enable_cors: bool,
    pub origins: Vec<String>,
}
