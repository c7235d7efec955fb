//! Global and per-database changes feeds

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{ChangesResult, DbUpdates};
use crate::types::{JsonObject, StringMap};
use reqwest::Method;
use serde::Serialize;

/// Options for [`CloudantV1::get_db_updates`]
#[derive(Debug, Clone, Default)]
pub struct GetDbUpdatesOptions {
    pub descending: Option<bool>,
    /// `normal`, `longpoll`, `continuous` or `eventsource`
    pub feed: Option<String>,
    /// Milliseconds between newline heartbeats
    pub heartbeat: Option<u64>,
    pub limit: Option<u64>,
    /// Milliseconds to wait for a change
    pub timeout: Option<u64>,
    /// Start after this sequence; `now` skips history
    pub since: Option<String>,
    pub headers: StringMap,
}

option_setters!(GetDbUpdatesOptions {
    descending: bool,
    feed: String,
    heartbeat: u64,
    limit: u64,
    timeout: u64,
    since: String,
});

/// Options for [`CloudantV1::post_changes`]
#[derive(Debug, Clone, Default)]
pub struct PostChangesOptions {
    pub db: String,
    /// Only report these documents (needs `filter=_doc_ids`)
    pub doc_ids: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
    /// Mango selector (needs `filter=_selector`)
    pub selector: Option<JsonObject>,
    /// Same as `since`, sent as the `Last-Event-ID` header
    pub last_event_id: Option<String>,
    pub att_encoding_info: Option<bool>,
    pub attachments: Option<bool>,
    pub conflicts: Option<bool>,
    pub descending: Option<bool>,
    pub feed: Option<String>,
    pub filter: Option<String>,
    pub heartbeat: Option<u64>,
    pub include_docs: Option<bool>,
    pub limit: Option<u64>,
    pub seq_interval: Option<u64>,
    pub since: Option<String>,
    /// `main_only` or `all_docs`
    pub style: Option<String>,
    pub timeout: Option<u64>,
    /// View used by `filter=_view`
    pub view: Option<String>,
    pub headers: StringMap,
}

impl PostChangesOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Default::default()
        }
    }
}

option_setters!(PostChangesOptions {
    doc_ids: Vec<String>,
    fields: Vec<String>,
    selector: JsonObject,
    last_event_id: String,
    att_encoding_info: bool,
    attachments: bool,
    conflicts: bool,
    descending: bool,
    feed: String,
    filter: String,
    heartbeat: u64,
    include_docs: bool,
    limit: u64,
    seq_interval: u64,
    since: String,
    style: String,
    timeout: u64,
    view: String,
});

#[derive(Serialize)]
struct ChangesBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_ids: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a JsonObject>,
}

impl CloudantV1 {
    /// Query the feed of database creations, updates and deletions
    pub async fn get_db_updates(&self, options: &GetDbUpdatesOptions) -> Result<DbUpdates> {
        let request = self.db_updates_request("getDbUpdates", options)?;
        self.send(request).await
    }

    /// Like [`get_db_updates`](Self::get_db_updates), streaming the raw body
    pub async fn get_db_updates_as_stream(&self, options: &GetDbUpdatesOptions) -> Result<ByteStream> {
        let request = self.db_updates_request("getDbUpdatesAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Query the changes of one database
    pub async fn post_changes(&self, options: &PostChangesOptions) -> Result<ChangesResult> {
        let request = self.changes_request("postChanges", options)?;
        self.send(request).await
    }

    /// Like [`post_changes`](Self::post_changes), streaming the raw body.
    ///
    /// Use this for `continuous` and `eventsource` feeds.
    pub async fn post_changes_as_stream(&self, options: &PostChangesOptions) -> Result<ByteStream> {
        let request = self.changes_request("postChangesAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    fn db_updates_request(&self, operation_id: &str, options: &GetDbUpdatesOptions) -> Result<RequestBuilder> {
        Ok(self
            .request(operation_id, Method::GET, "/_db_updates", &[], &options.headers)?
            .query_opt("descending", options.descending)
            .query_opt("feed", options.feed.as_deref())
            .query_opt("heartbeat", options.heartbeat)
            .query_opt("limit", options.limit)
            .query_opt("timeout", options.timeout)
            .query_opt("since", options.since.as_deref()))
    }

    fn changes_request(&self, operation_id: &str, options: &PostChangesOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db)])?;
        let body = ChangesBody {
            doc_ids: options.doc_ids.as_ref(),
            fields: options.fields.as_ref(),
            selector: options.selector.as_ref(),
        };

        self.request(
            operation_id,
            Method::POST,
            "/{db}/_changes",
            &[("db", &options.db)],
            &options.headers,
        )?
        .header_opt("Last-Event-ID", options.last_event_id.as_deref())
        .query_opt("att_encoding_info", options.att_encoding_info)
        .query_opt("attachments", options.attachments)
        .query_opt("conflicts", options.conflicts)
        .query_opt("descending", options.descending)
        .query_opt("feed", options.feed.as_deref())
        .query_opt("filter", options.filter.as_deref())
        .query_opt("heartbeat", options.heartbeat)
        .query_opt("include_docs", options.include_docs)
        .query_opt("limit", options.limit)
        .query_opt("seq_interval", options.seq_interval)
        .query_opt("since", options.since.as_deref())
        .query_opt("style", options.style.as_deref())
        .query_opt("timeout", options.timeout)
        .query_opt("view", options.view.as_deref())
        .json(&body)
    }
}
