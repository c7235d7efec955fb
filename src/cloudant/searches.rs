//! Search (Lucene) endpoints

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{SearchAnalyzeResult, SearchInfoResult, SearchResult};
use crate::types::{JsonObject, StringMap};
use reqwest::Method;
use serde::Serialize;

/// Options for [`CloudantV1::post_search_analyze`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostSearchAnalyzeOptions {
    /// Analyzer name, e.g. `standard` or `english`
    pub analyzer: String,
    pub text: String,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostSearchAnalyzeOptions {
    pub fn new(analyzer: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            analyzer: analyzer.into(),
            text: text.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostSearchAnalyzeOptions {});

/// Options for [`CloudantV1::post_search`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostSearchOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub ddoc: String,
    #[serde(skip)]
    pub index: String,
    /// Lucene query
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
    /// Fields to count distinct values of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<String>>,
    /// `[field, value]` pairs restricting the results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drilldown: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sort: Option<Vec<String>>,
    /// Numeric range facets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<JsonObject>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostSearchOptions {
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        index: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            query: query.into(),
            ..Default::default()
        }
    }
}

option_setters!(PostSearchOptions {
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
    counts: Vec<String>,
    drilldown: Vec<Vec<String>>,
    group_field: String,
    group_limit: u64,
    group_sort: Vec<String>,
    ranges: JsonObject,
});

/// Options for [`CloudantV1::get_search_info`]
#[derive(Debug, Clone, Default)]
pub struct GetSearchInfoOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    pub headers: StringMap,
}

impl GetSearchInfoOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetSearchInfoOptions {});

impl CloudantV1 {
    /// Show how an analyzer tokenizes text
    pub async fn post_search_analyze(&self, options: &PostSearchAnalyzeOptions) -> Result<SearchAnalyzeResult> {
        require(&[("analyzer", &options.analyzer), ("text", &options.text)])?;
        let request = self
            .request(
                "postSearchAnalyze",
                Method::POST,
                "/_search_analyze",
                &[],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }

    /// Query a search index
    pub async fn post_search(&self, options: &PostSearchOptions) -> Result<SearchResult> {
        let request = self.search_request("postSearch", options)?;
        self.send(request).await
    }

    /// Like [`post_search`](Self::post_search), streaming the raw body
    pub async fn post_search_as_stream(&self, options: &PostSearchOptions) -> Result<ByteStream> {
        let request = self.search_request("postSearchAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Retrieve search index statistics
    pub async fn get_search_info(&self, options: &GetSearchInfoOptions) -> Result<SearchInfoResult> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        let request = self.request(
            "getSearchInfo",
            Method::GET,
            "/{db}/_design/{ddoc}/_search_info/{index}",
            &params,
            &options.headers,
        )?;
        self.send(request).await
    }

    fn search_request(&self, operation_id: &str, options: &PostSearchOptions) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        require(&[("query", &options.query)])?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_design/{ddoc}/_search/{index}",
            &params,
            &options.headers,
        )?
        .json(options)
    }
}
