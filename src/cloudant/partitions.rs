//! Partitioned database endpoints
//!
//! Every query here is scoped to one partition key, which lets the server
//! answer from a single shard.

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{
    AllDocsQuery, AllDocsResult, ExplainResult, FindResult, PartitionInformation, SearchResult, ViewQuery,
    ViewResult,
};
use crate::types::{JsonObject, StringMap};
use reqwest::Method;
use serde::Serialize;

/// Options for [`CloudantV1::get_partition_information`]
#[derive(Debug, Clone, Default)]
pub struct GetPartitionInformationOptions {
    pub db: String,
    pub partition_key: String,
    pub headers: StringMap,
}

impl GetPartitionInformationOptions {
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetPartitionInformationOptions {});

/// Options for [`CloudantV1::post_partition_all_docs`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPartitionAllDocsOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub partition_key: String,
    #[serde(flatten)]
    pub query: AllDocsQuery,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostPartitionAllDocsOptions {
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>, query: AllDocsQuery) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            query,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostPartitionAllDocsOptions {});

/// Options for [`CloudantV1::post_partition_search`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPartitionSearchOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub partition_key: String,
    #[serde(skip)]
    pub ddoc: String,
    #[serde(skip)]
    pub index: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostPartitionSearchOptions {
    pub fn new(
        db: impl Into<String>,
        partition_key: impl Into<String>,
        ddoc: impl Into<String>,
        index: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            query: query.into(),
            ..Default::default()
        }
    }
}

option_setters!(PostPartitionSearchOptions {
    bookmark: String,
    highlight_fields: Vec<String>,
    highlight_number: u64,
    highlight_post_tag: String,
    highlight_pre_tag: String,
    highlight_size: u64,
    include_docs: bool,
    include_fields: Vec<String>,
    limit: u64,
    sort: Vec<String>,
    stale: String,
});

/// Options for [`CloudantV1::post_partition_view`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPartitionViewOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub partition_key: String,
    #[serde(skip)]
    pub ddoc: String,
    #[serde(skip)]
    pub view: String,
    #[serde(flatten)]
    pub query: ViewQuery,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostPartitionViewOptions {
    pub fn new(
        db: impl Into<String>,
        partition_key: impl Into<String>,
        ddoc: impl Into<String>,
        view: impl Into<String>,
        query: ViewQuery,
    ) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            query,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostPartitionViewOptions {});

/// Options for [`CloudantV1::post_partition_find`] and [`CloudantV1::post_partition_explain`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPartitionFindOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub partition_key: String,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_index: Option<Vec<String>>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostPartitionFindOptions {
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>, selector: JsonObject) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            selector,
            ..Default::default()
        }
    }
}

option_setters!(PostPartitionFindOptions {
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
});

/// Options for [`CloudantV1::post_partition_explain`]
pub type PostPartitionExplainOptions = PostPartitionFindOptions;

impl CloudantV1 {
    /// Retrieve document count and size of one partition
    pub async fn get_partition_information(
        &self,
        options: &GetPartitionInformationOptions,
    ) -> Result<PartitionInformation> {
        let params = [
            ("db", options.db.as_str()),
            ("partition_key", options.partition_key.as_str()),
        ];
        require(&params)?;
        let request = self.request(
            "getPartitionInformation",
            Method::GET,
            "/{db}/_partition/{partition_key}",
            &params,
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Query the primary index within a partition
    pub async fn post_partition_all_docs(&self, options: &PostPartitionAllDocsOptions) -> Result<AllDocsResult> {
        let request = self.partition_all_docs_request("postPartitionAllDocs", options)?;
        self.send(request).await
    }

    /// Like [`post_partition_all_docs`](Self::post_partition_all_docs), streaming the raw body
    pub async fn post_partition_all_docs_as_stream(
        &self,
        options: &PostPartitionAllDocsOptions,
    ) -> Result<ByteStream> {
        let request = self.partition_all_docs_request("postPartitionAllDocsAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Query a partitioned search index
    pub async fn post_partition_search(&self, options: &PostPartitionSearchOptions) -> Result<SearchResult> {
        let request = self.partition_search_request("postPartitionSearch", options)?;
        self.send(request).await
    }

    /// Like [`post_partition_search`](Self::post_partition_search), streaming the raw body
    pub async fn post_partition_search_as_stream(
        &self,
        options: &PostPartitionSearchOptions,
    ) -> Result<ByteStream> {
        let request = self.partition_search_request("postPartitionSearchAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Query a partitioned view
    pub async fn post_partition_view(&self, options: &PostPartitionViewOptions) -> Result<ViewResult> {
        let request = self.partition_view_request("postPartitionView", options)?;
        self.send(request).await
    }

    /// Like [`post_partition_view`](Self::post_partition_view), streaming the raw body
    pub async fn post_partition_view_as_stream(&self, options: &PostPartitionViewOptions) -> Result<ByteStream> {
        let request = self.partition_view_request("postPartitionViewAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Explain a Mango query within a partition
    pub async fn post_partition_explain(&self, options: &PostPartitionExplainOptions) -> Result<ExplainResult> {
        let request = self.partition_find_request("postPartitionExplain", "_explain", options)?;
        self.send(request).await
    }

    /// Run a Mango query within a partition
    pub async fn post_partition_find(&self, options: &PostPartitionFindOptions) -> Result<FindResult> {
        let request = self.partition_find_request("postPartitionFind", "_find", options)?;
        self.send(request).await
    }

    /// Like [`post_partition_find`](Self::post_partition_find), streaming the raw body
    pub async fn post_partition_find_as_stream(&self, options: &PostPartitionFindOptions) -> Result<ByteStream> {
        let request = self.partition_find_request("postPartitionFindAsStream", "_find", options)?;
        self.http.execute_stream(&request).await
    }

    fn partition_all_docs_request(
        &self,
        operation_id: &str,
        options: &PostPartitionAllDocsOptions,
    ) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("partition_key", options.partition_key.as_str()),
        ];
        require(&params)?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_partition/{partition_key}/_all_docs",
            &params,
            &options.headers,
        )?
        .json(options)
    }

    fn partition_search_request(
        &self,
        operation_id: &str,
        options: &PostPartitionSearchOptions,
    ) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("partition_key", options.partition_key.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        require(&[("query", &options.query)])?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_partition/{partition_key}/_design/{ddoc}/_search/{index}",
            &params,
            &options.headers,
        )?
        .json(options)
    }

    fn partition_view_request(&self, operation_id: &str, options: &PostPartitionViewOptions) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("partition_key", options.partition_key.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("view", options.view.as_str()),
        ];
        require(&params)?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_partition/{partition_key}/_design/{ddoc}/_view/{view}",
            &params,
            &options.headers,
        )?
        .json(options)
    }

    fn partition_find_request(
        &self,
        operation_id: &str,
        endpoint: &str,
        options: &PostPartitionFindOptions,
    ) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("partition_key", options.partition_key.as_str()),
        ];
        require(&params)?;
        let template = format!("/{{db}}/_partition/{{partition_key}}/{endpoint}");
        self.request(operation_id, Method::POST, &template, &params, &options.headers)?
            .json(options)
    }
}
