//! Session, database permissions, legacy API keys and CORS

use super::{require, CloudantV1};
use crate::error::{Error, Result};
use crate::models::{ApiKeysResult, CorsInformation, OkResult, Security, SecurityObject, SessionInformation};
use crate::types::StringMap;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

/// Options for [`CloudantV1::get_session_information`]
#[derive(Debug, Clone, Default)]
pub struct GetSessionInformationOptions {
    pub headers: StringMap,
}

impl GetSessionInformationOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(GetSessionInformationOptions {});

/// Options for [`CloudantV1::get_security`]
#[derive(Debug, Clone, Default)]
pub struct GetSecurityOptions {
    pub db: String,
    pub headers: StringMap,
}

impl GetSecurityOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetSecurityOptions {});

/// Options for [`CloudantV1::put_security`] and
/// [`CloudantV1::put_cloudant_security_configuration`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PutSecurityOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<SecurityObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<SecurityObject>,
    /// Roles granted per user or API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudant: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couchdb_auth_only: Option<bool>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PutSecurityOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Default::default()
        }
    }

    /// Start from an existing security document
    pub fn from_security(db: impl Into<String>, security: Security) -> Self {
        Self {
            db: db.into(),
            admins: security.admins,
            members: security.members,
            cloudant: security.cloudant,
            couchdb_auth_only: security.couchdb_auth_only,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PutSecurityOptions {
    admins: SecurityObject,
    members: SecurityObject,
    cloudant: HashMap<String, Vec<String>>,
    couchdb_auth_only: bool,
});

pub type PutCloudantSecurityConfigurationOptions = PutSecurityOptions;

/// Options for [`CloudantV1::post_api_keys`]
#[derive(Debug, Clone, Default)]
pub struct PostApiKeysOptions {
    pub headers: StringMap,
}

impl PostApiKeysOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(PostApiKeysOptions {});

/// Options for [`CloudantV1::get_cors_information`]
#[derive(Debug, Clone, Default)]
pub struct GetCorsInformationOptions {
    pub headers: StringMap,
}

impl GetCorsInformationOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(GetCorsInformationOptions {});

/// Options for [`CloudantV1::put_cors_configuration`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PutCorsConfigurationOptions {
    /// Allowed origins; an empty list blocks all cross-origin requests
    pub origins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_cors: Option<bool>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PutCorsConfigurationOptions {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins,
            ..Default::default()
        }
    }
}

option_setters!(PutCorsConfigurationOptions {
    allow_credentials: bool,
    enable_cors: bool,
});

impl CloudantV1 {
    /// Retrieve information about the authenticated session
    pub async fn get_session_information(
        &self,
        options: &GetSessionInformationOptions,
    ) -> Result<SessionInformation> {
        let request = self.request("getSessionInformation", Method::GET, "/_session", &[], &options.headers)?;
        self.send(request).await
    }

    /// Retrieve the `_security` document of a database
    pub async fn get_security(&self, options: &GetSecurityOptions) -> Result<Security> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "getSecurity",
            Method::GET,
            "/{db}/_security",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Replace the `_security` document of a database
    pub async fn put_security(&self, options: &PutSecurityOptions) -> Result<OkResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "putSecurity",
                Method::PUT,
                "/{db}/_security",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }

    /// Generate a legacy API key and password
    pub async fn post_api_keys(&self, options: &PostApiKeysOptions) -> Result<ApiKeysResult> {
        let request = self.request(
            "postApiKeys",
            Method::POST,
            "/_api/v2/api_keys",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Replace Cloudant permissions through the account API
    pub async fn put_cloudant_security_configuration(
        &self,
        options: &PutCloudantSecurityConfigurationOptions,
    ) -> Result<OkResult> {
        require(&[("db", &options.db)])?;
        if options.cloudant.is_none() {
            return Err(Error::validation("cloudant"));
        }
        let request = self
            .request(
                "putCloudantSecurityConfiguration",
                Method::PUT,
                "/_api/v2/db/{db}/_security",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }

    /// Retrieve the account CORS configuration
    pub async fn get_cors_information(&self, options: &GetCorsInformationOptions) -> Result<CorsInformation> {
        let request = self.request(
            "getCorsInformation",
            Method::GET,
            "/_api/v2/user/config/cors",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Replace the account CORS configuration
    pub async fn put_cors_configuration(&self, options: &PutCorsConfigurationOptions) -> Result<OkResult> {
        let request = self
            .request(
                "putCorsConfiguration",
                Method::PUT,
                "/_api/v2/user/config/cors",
                &[],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }
}
