//! Cloudant Query (`_find`, `_explain`) and index management

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{ExplainResult, FindResult, IndexDefinition, IndexResult, IndexesInformation, OkResult};
use crate::types::{JsonObject, StringMap};
use reqwest::Method;
use serde::Serialize;

/// Options for [`CloudantV1::post_find`] and [`CloudantV1::post_explain`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostFindOptions {
    #[serde(skip)]
    pub db: String,
    /// Mango selector
    pub selector: JsonObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// `[{"field": "asc"}]` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    /// `true`, `false` or `lazy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    /// Design document name, or `[ddoc, index]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_index: Option<Vec<String>>,
    /// Read quorum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostFindOptions {
    pub fn new(db: impl Into<String>, selector: JsonObject) -> Self {
        Self {
            db: db.into(),
            selector,
            ..Default::default()
        }
    }
}

option_setters!(PostFindOptions {
    bookmark: String,
    conflicts: bool,
    execution_stats: bool,
    fields: Vec<String>,
    limit: u64,
    skip: u64,
    sort: Vec<JsonObject>,
    stable: bool,
    update: String,
    use_index: Vec<String>,
    r: u32,
});

/// Options for [`CloudantV1::post_explain`]
pub type PostExplainOptions = PostFindOptions;

/// Options for [`CloudantV1::get_indexes_information`]
#[derive(Debug, Clone, Default)]
pub struct GetIndexesInformationOptions {
    pub db: String,
    pub headers: StringMap,
}

impl GetIndexesInformationOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetIndexesInformationOptions {});

/// Options for [`CloudantV1::post_index`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostIndexOptions {
    #[serde(skip)]
    pub db: String,
    pub index: IndexDefinition,
    /// Design document to hold the index; generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
    /// `json` (default) or `text`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostIndexOptions {
    pub fn new(db: impl Into<String>, index: IndexDefinition) -> Self {
        Self {
            db: db.into(),
            index,
            ..Default::default()
        }
    }
}

option_setters!(PostIndexOptions {
    ddoc: String,
    name: String,
    partitioned: bool,
    index_type: String,
});

/// Options for [`CloudantV1::delete_index`]
#[derive(Debug, Clone, Default)]
pub struct DeleteIndexOptions {
    pub db: String,
    pub ddoc: String,
    /// `json` or `text`
    pub index_type: String,
    pub index: String,
    pub headers: StringMap,
}

impl DeleteIndexOptions {
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        index_type: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index_type: index_type.into(),
            index: index.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(DeleteIndexOptions {});

impl CloudantV1 {
    /// Show which index a query would use, without running it
    pub async fn post_explain(&self, options: &PostExplainOptions) -> Result<ExplainResult> {
        let request = self.find_request("postExplain", "/{db}/_explain", options)?;
        self.send(request).await
    }

    /// Run a Mango query
    pub async fn post_find(&self, options: &PostFindOptions) -> Result<FindResult> {
        let request = self.find_request("postFind", "/{db}/_find", options)?;
        self.send(request).await
    }

    /// Like [`post_find`](Self::post_find), streaming the raw body
    pub async fn post_find_as_stream(&self, options: &PostFindOptions) -> Result<ByteStream> {
        let request = self.find_request("postFindAsStream", "/{db}/_find", options)?;
        self.http.execute_stream(&request).await
    }

    /// List the Query indexes of a database
    pub async fn get_indexes_information(
        &self,
        options: &GetIndexesInformationOptions,
    ) -> Result<IndexesInformation> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "getIndexesInformation",
            Method::GET,
            "/{db}/_index",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Create a Query index
    pub async fn post_index(&self, options: &PostIndexOptions) -> Result<IndexResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "postIndex",
                Method::POST,
                "/{db}/_index",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }

    /// Delete a Query index
    pub async fn delete_index(&self, options: &DeleteIndexOptions) -> Result<OkResult> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("type", options.index_type.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        let request = self.request(
            "deleteIndex",
            Method::DELETE,
            "/{db}/_index/_design/{ddoc}/{type}/{index}",
            &params,
            &options.headers,
        )?;
        self.send(request).await
    }

    fn find_request(&self, operation_id: &str, template: &str, options: &PostFindOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db)])?;
        self.request(operation_id, Method::POST, template, &[("db", &options.db)], &options.headers)?
            .json(options)
    }
}
