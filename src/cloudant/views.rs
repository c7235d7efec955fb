//! MapReduce view endpoints

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{ViewQueriesResult, ViewQuery, ViewResult};
use crate::types::StringMap;
use reqwest::Method;
use serde::Serialize;

/// Options for [`CloudantV1::post_view`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostViewOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub ddoc: String,
    #[serde(skip)]
    pub view: String,
    /// Query parameters, sent as the JSON body
    #[serde(flatten)]
    pub query: ViewQuery,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostViewOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, view: impl Into<String>, query: ViewQuery) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            query,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostViewOptions {});

/// Options for [`CloudantV1::post_view_queries`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostViewQueriesOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip)]
    pub ddoc: String,
    #[serde(skip)]
    pub view: String,
    pub queries: Vec<ViewQuery>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostViewQueriesOptions {
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        view: impl Into<String>,
        queries: Vec<ViewQuery>,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            queries,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostViewQueriesOptions {});

impl CloudantV1 {
    /// Query a MapReduce view
    pub async fn post_view(&self, options: &PostViewOptions) -> Result<ViewResult> {
        let request = self.view_request("postView", options)?;
        self.send(request).await
    }

    /// Like [`post_view`](Self::post_view), streaming the raw body
    pub async fn post_view_as_stream(&self, options: &PostViewOptions) -> Result<ByteStream> {
        let request = self.view_request("postViewAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Run several queries against one view
    pub async fn post_view_queries(&self, options: &PostViewQueriesOptions) -> Result<ViewQueriesResult> {
        let request = self.view_queries_request("postViewQueries", options)?;
        self.send(request).await
    }

    /// Like [`post_view_queries`](Self::post_view_queries), streaming the raw body
    pub async fn post_view_queries_as_stream(&self, options: &PostViewQueriesOptions) -> Result<ByteStream> {
        let request = self.view_queries_request("postViewQueriesAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    fn view_request(&self, operation_id: &str, options: &PostViewOptions) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("view", options.view.as_str()),
        ];
        require(&params)?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_design/{ddoc}/_view/{view}",
            &params,
            &options.headers,
        )?
        .json(options)
    }

    fn view_queries_request(&self, operation_id: &str, options: &PostViewQueriesOptions) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("view", options.view.as_str()),
        ];
        require(&params)?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_design/{ddoc}/_view/{view}/queries",
            &params,
            &options.headers,
        )?
        .json(options)
    }
}
