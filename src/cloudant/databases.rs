//! Database lifecycle and metadata endpoints

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::HeadResponse;
use crate::models::{DatabaseInformation, DbsInfoResult, OkResult};
use crate::types::StringMap;
use reqwest::Method;
use serde_json::json;

/// Options for [`CloudantV1::get_all_dbs`]
#[derive(Debug, Clone, Default)]
pub struct GetAllDbsOptions {
    pub descending: Option<bool>,
    pub end_key: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub start_key: Option<String>,
    pub headers: StringMap,
}

option_setters!(GetAllDbsOptions {
    descending: bool,
    end_key: String,
    limit: u64,
    skip: u64,
    start_key: String,
});

/// Options for [`CloudantV1::post_dbs_info`]
#[derive(Debug, Clone, Default)]
pub struct PostDbsInfoOptions {
    /// Database names
    pub keys: Vec<String>,
    pub headers: StringMap,
}

impl PostDbsInfoOptions {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostDbsInfoOptions {});

/// Options for the single-database endpoints
#[derive(Debug, Clone, Default)]
pub struct DatabaseOptions {
    pub db: String,
    pub headers: StringMap,
}

impl DatabaseOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(DatabaseOptions {});

/// Options for [`CloudantV1::head_database`]
pub type HeadDatabaseOptions = DatabaseOptions;
/// Options for [`CloudantV1::get_database_information`]
pub type GetDatabaseInformationOptions = DatabaseOptions;
/// Options for [`CloudantV1::delete_database`]
pub type DeleteDatabaseOptions = DatabaseOptions;

/// Options for [`CloudantV1::put_database`]
#[derive(Debug, Clone, Default)]
pub struct PutDatabaseOptions {
    pub db: String,
    /// Create a partitioned database
    pub partitioned: Option<bool>,
    /// Number of shards
    pub q: Option<u32>,
    pub headers: StringMap,
}

impl PutDatabaseOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Default::default()
        }
    }
}

option_setters!(PutDatabaseOptions {
    partitioned: bool,
    q: u32,
});

impl CloudantV1 {
    /// Check that a database exists
    pub async fn head_database(&self, options: &HeadDatabaseOptions) -> Result<HeadResponse> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "headDatabase",
            Method::HEAD,
            "/{db}",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.http.execute_head(&request).await
    }

    /// List database names
    pub async fn get_all_dbs(&self, options: &GetAllDbsOptions) -> Result<Vec<String>> {
        let request = self
            .request("getAllDbs", Method::GET, "/_all_dbs", &[], &options.headers)?
            .query_opt("descending", options.descending)
            .query_json("end_key", options.end_key.as_ref())?
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .query_json("start_key", options.start_key.as_ref())?;
        self.send(request).await
    }

    /// Retrieve information about several databases at once
    pub async fn post_dbs_info(&self, options: &PostDbsInfoOptions) -> Result<Vec<DbsInfoResult>> {
        let request = self
            .request("postDbsInfo", Method::POST, "/_dbs_info", &[], &options.headers)?
            .json(&json!({ "keys": options.keys }))?;
        self.send(request).await
    }

    /// Delete a database and everything in it
    pub async fn delete_database(&self, options: &DeleteDatabaseOptions) -> Result<OkResult> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "deleteDatabase",
            Method::DELETE,
            "/{db}",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Retrieve information about a database
    pub async fn get_database_information(
        &self,
        options: &GetDatabaseInformationOptions,
    ) -> Result<DatabaseInformation> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "getDatabaseInformation",
            Method::GET,
            "/{db}",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Create a database
    pub async fn put_database(&self, options: &PutDatabaseOptions) -> Result<OkResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "putDatabase",
                Method::PUT,
                "/{db}",
                &[("db", &options.db)],
                &options.headers,
            )?
            .query_opt("partitioned", options.partitioned)
            .query_opt("q", options.q);
        self.send(request).await
    }
}
