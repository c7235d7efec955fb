//! Document CRUD, `_all_docs` and bulk endpoints

use super::{require, CloudantV1};
use crate::error::{Error, Result};
use crate::http::{BinaryResponse, ByteStream, HeadResponse, RequestBuilder};
use crate::models::{
    AllDocsQueriesResult, AllDocsQuery, AllDocsResult, BulkDocs, BulkGetQueryDocument, BulkGetResult,
    Document, DocumentResult,
};
use crate::types::StringMap;
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

const MULTIPART_MIXED: &str = "multipart/mixed";
const MULTIPART_RELATED: &str = "multipart/related";

/// Options for [`CloudantV1::post_document`]
#[derive(Debug, Clone, Default)]
pub struct PostDocumentOptions {
    pub db: String,
    pub document: Option<Document>,
    /// Pre-encoded body, sent instead of `document`
    pub body: Option<Bytes>,
    /// Content type of `body`, e.g. `multipart/related; boundary=...`
    pub content_type: Option<String>,
    /// `ok` to write in batch mode
    pub batch: Option<String>,
    pub headers: StringMap,
}

impl PostDocumentOptions {
    pub fn new(db: impl Into<String>, document: Document) -> Self {
        Self {
            db: db.into(),
            document: Some(document),
            ..Default::default()
        }
    }
}

option_setters!(PostDocumentOptions {
    document: Document,
    body: Bytes,
    content_type: String,
    batch: String,
});

/// Options for [`CloudantV1::post_all_docs`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostAllDocsOptions {
    #[serde(skip)]
    pub db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub att_encoding_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostAllDocsOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Default::default()
        }
    }
}

option_setters!(PostAllDocsOptions {
    att_encoding_info: bool,
    attachments: bool,
    conflicts: bool,
    descending: bool,
    include_docs: bool,
    inclusive_end: bool,
    limit: u64,
    skip: u64,
    update_seq: bool,
    end_key: String,
    key: String,
    keys: Vec<String>,
    start_key: String,
});

/// Options for [`CloudantV1::post_all_docs_queries`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostAllDocsQueriesOptions {
    #[serde(skip)]
    pub db: String,
    pub queries: Vec<AllDocsQuery>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl PostAllDocsQueriesOptions {
    pub fn new(db: impl Into<String>, queries: Vec<AllDocsQuery>) -> Self {
        Self {
            db: db.into(),
            queries,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostAllDocsQueriesOptions {});

/// Options for [`CloudantV1::post_bulk_docs`]
#[derive(Debug, Clone, Default)]
pub struct PostBulkDocsOptions {
    pub db: String,
    pub bulk_docs: Option<BulkDocs>,
    /// Pre-encoded JSON body, sent instead of `bulk_docs`
    pub body: Option<Bytes>,
    pub headers: StringMap,
}

impl PostBulkDocsOptions {
    pub fn new(db: impl Into<String>, bulk_docs: BulkDocs) -> Self {
        Self {
            db: db.into(),
            bulk_docs: Some(bulk_docs),
            ..Default::default()
        }
    }
}

option_setters!(PostBulkDocsOptions {
    bulk_docs: BulkDocs,
    body: Bytes,
});

/// Options for [`CloudantV1::post_bulk_get`] and its multipart variants
#[derive(Debug, Clone, Default)]
pub struct PostBulkGetOptions {
    pub db: String,
    pub docs: Vec<BulkGetQueryDocument>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub latest: Option<bool>,
    pub revs: Option<bool>,
    pub headers: StringMap,
}

impl PostBulkGetOptions {
    pub fn new(db: impl Into<String>, docs: Vec<BulkGetQueryDocument>) -> Self {
        Self {
            db: db.into(),
            docs,
            ..Default::default()
        }
    }
}

option_setters!(PostBulkGetOptions {
    attachments: bool,
    att_encoding_info: bool,
    latest: bool,
    revs: bool,
});

/// Options for [`CloudantV1::delete_document`]
#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl DeleteDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteDocumentOptions {
    if_match: String,
    batch: String,
    rev: String,
});

/// Options for [`CloudantV1::get_document`] and its multipart and stream variants
#[derive(Debug, Clone, Default)]
pub struct GetDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    /// Only include attachments changed after these revisions
    pub atts_since: Option<Vec<String>>,
    pub conflicts: Option<bool>,
    pub deleted_conflicts: Option<bool>,
    pub latest: Option<bool>,
    pub local_seq: Option<bool>,
    pub meta: Option<bool>,
    pub rev: Option<String>,
    pub revs: Option<bool>,
    pub revs_info: Option<bool>,
    pub headers: StringMap,
}

impl GetDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetDocumentOptions {
    if_none_match: String,
    attachments: bool,
    att_encoding_info: bool,
    atts_since: Vec<String>,
    conflicts: bool,
    deleted_conflicts: bool,
    latest: bool,
    local_seq: bool,
    meta: bool,
    rev: String,
    revs: bool,
    revs_info: bool,
});

/// Options for [`CloudantV1::head_document`]
#[derive(Debug, Clone, Default)]
pub struct HeadDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub latest: Option<bool>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl HeadDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(HeadDocumentOptions {
    if_none_match: String,
    latest: bool,
    rev: String,
});

/// Options for [`CloudantV1::put_document`]
#[derive(Debug, Clone, Default)]
pub struct PutDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub document: Option<Document>,
    /// Pre-encoded body, sent instead of `document`
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    /// When false, the revision in the body is stored as is
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl PutDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>, document: Document) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            document: Some(document),
            ..Default::default()
        }
    }
}

option_setters!(PutDocumentOptions {
    document: Document,
    body: Bytes,
    content_type: String,
    if_match: String,
    batch: String,
    new_edits: bool,
    rev: String,
});

impl CloudantV1 {
    /// Create a document with a server generated id (or the `_id` in the body)
    pub async fn post_document(&self, options: &PostDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "postDocument",
                Method::POST,
                "/{db}",
                &[("db", &options.db)],
                &options.headers,
            )?
            .query_opt("batch", options.batch.as_deref());
        let request = with_document_body(
            request,
            options.document.as_ref(),
            options.body.as_ref(),
            options.content_type.as_deref(),
        )?;
        self.send(request).await
    }

    /// Query the primary index
    pub async fn post_all_docs(&self, options: &PostAllDocsOptions) -> Result<AllDocsResult> {
        let request = self.all_docs_request("postAllDocs", options)?;
        self.send(request).await
    }

    /// Like [`post_all_docs`](Self::post_all_docs), streaming the raw body
    pub async fn post_all_docs_as_stream(&self, options: &PostAllDocsOptions) -> Result<ByteStream> {
        let request = self.all_docs_request("postAllDocsAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Run several `_all_docs` queries in one request
    pub async fn post_all_docs_queries(
        &self,
        options: &PostAllDocsQueriesOptions,
    ) -> Result<AllDocsQueriesResult> {
        let request = self.all_docs_queries_request("postAllDocsQueries", options)?;
        self.send(request).await
    }

    /// Like [`post_all_docs_queries`](Self::post_all_docs_queries), streaming the raw body
    pub async fn post_all_docs_queries_as_stream(
        &self,
        options: &PostAllDocsQueriesOptions,
    ) -> Result<ByteStream> {
        let request = self.all_docs_queries_request("postAllDocsQueriesAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Create, update or delete many documents.
    ///
    /// The call succeeds as a whole even when individual documents are
    /// rejected; check each [`DocumentResult`] for `error` and `reason`.
    pub async fn post_bulk_docs(&self, options: &PostBulkDocsOptions) -> Result<Vec<DocumentResult>> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "postBulkDocs",
            Method::POST,
            "/{db}/_bulk_docs",
            &[("db", &options.db)],
            &options.headers,
        )?;
        let request = match (&options.bulk_docs, &options.body) {
            (Some(bulk_docs), _) => request.json(bulk_docs)?,
            (None, Some(body)) => request.raw("application/json", body.clone()),
            (None, None) => return Err(Error::validation("bulk_docs")),
        };
        self.send(request).await
    }

    /// Fetch several documents, or specific revisions, in one request
    pub async fn post_bulk_get(&self, options: &PostBulkGetOptions) -> Result<BulkGetResult> {
        let request = self.bulk_get_request("postBulkGet", options)?;
        self.send(request).await
    }

    /// Like [`post_bulk_get`](Self::post_bulk_get), answered as `multipart/mixed`
    pub async fn post_bulk_get_as_mixed(&self, options: &PostBulkGetOptions) -> Result<BinaryResponse> {
        let request = self
            .bulk_get_request("postBulkGetAsMixed", options)?
            .header("Accept", MULTIPART_MIXED);
        self.http.execute_bytes(&request).await
    }

    /// Like [`post_bulk_get`](Self::post_bulk_get), answered as `multipart/related`
    pub async fn post_bulk_get_as_related(&self, options: &PostBulkGetOptions) -> Result<BinaryResponse> {
        let request = self
            .bulk_get_request("postBulkGetAsRelated", options)?
            .header("Accept", MULTIPART_RELATED);
        self.http.execute_bytes(&request).await
    }

    /// Like [`post_bulk_get`](Self::post_bulk_get), streaming the raw body
    pub async fn post_bulk_get_as_stream(&self, options: &PostBulkGetOptions) -> Result<ByteStream> {
        let request = self.bulk_get_request("postBulkGetAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Delete a document (writes a tombstone revision)
    pub async fn delete_document(&self, options: &DeleteDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "deleteDocument",
                Method::DELETE,
                "/{db}/{doc_id}",
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref());
        self.send(request).await
    }

    /// Retrieve a document
    pub async fn get_document(&self, options: &GetDocumentOptions) -> Result<Document> {
        let request = self.document_request("getDocument", options)?;
        self.send(request).await
    }

    /// Retrieve a document with its attachments as `multipart/mixed`
    pub async fn get_document_as_mixed(&self, options: &GetDocumentOptions) -> Result<BinaryResponse> {
        let request = self
            .document_request("getDocumentAsMixed", options)?
            .header("Accept", MULTIPART_MIXED);
        self.http.execute_bytes(&request).await
    }

    /// Retrieve a document with its attachments as `multipart/related`
    pub async fn get_document_as_related(&self, options: &GetDocumentOptions) -> Result<BinaryResponse> {
        let request = self
            .document_request("getDocumentAsRelated", options)?
            .header("Accept", MULTIPART_RELATED);
        self.http.execute_bytes(&request).await
    }

    /// Retrieve a document as a byte stream
    pub async fn get_document_as_stream(&self, options: &GetDocumentOptions) -> Result<ByteStream> {
        let request = self.document_request("getDocumentAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Retrieve the headers of a document; the ETag carries the revision
    pub async fn head_document(&self, options: &HeadDocumentOptions) -> Result<HeadResponse> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "headDocument",
                Method::HEAD,
                "/{db}/{doc_id}",
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("latest", options.latest)
            .query_opt("rev", options.rev.as_deref());
        self.http.execute_head(&request).await
    }

    /// Create or update a document
    pub async fn put_document(&self, options: &PutDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "putDocument",
                Method::PUT,
                "/{db}/{doc_id}",
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref());
        let request = with_document_body(
            request,
            options.document.as_ref(),
            options.body.as_ref(),
            options.content_type.as_deref(),
        )?;
        self.send(request).await
    }

    fn all_docs_request(&self, operation_id: &str, options: &PostAllDocsOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db)])?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_all_docs",
            &[("db", &options.db)],
            &options.headers,
        )?
        .json(options)
    }

    fn all_docs_queries_request(
        &self,
        operation_id: &str,
        options: &PostAllDocsQueriesOptions,
    ) -> Result<RequestBuilder> {
        require(&[("db", &options.db)])?;
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_all_docs/queries",
            &[("db", &options.db)],
            &options.headers,
        )?
        .json(options)
    }

    fn bulk_get_request(&self, operation_id: &str, options: &PostBulkGetOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db)])?;
        for doc in &options.docs {
            require(&[("docs.id", &doc.id)])?;
        }
        self.request(
            operation_id,
            Method::POST,
            "/{db}/_bulk_get",
            &[("db", &options.db)],
            &options.headers,
        )?
        .query_opt("attachments", options.attachments)
        .query_opt("att_encoding_info", options.att_encoding_info)
        .query_opt("latest", options.latest)
        .query_opt("revs", options.revs)
        .json(&json!({ "docs": options.docs }))
    }

    fn document_request(&self, operation_id: &str, options: &GetDocumentOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                operation_id,
                Method::GET,
                "/{db}/{doc_id}",
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_json("atts_since", options.atts_since.as_ref())?;
        Ok(request
            .query_opt("conflicts", options.conflicts)
            .query_opt("deleted_conflicts", options.deleted_conflicts)
            .query_opt("latest", options.latest)
            .query_opt("local_seq", options.local_seq)
            .query_opt("meta", options.meta)
            .query_opt("rev", options.rev.as_deref())
            .query_opt("revs", options.revs)
            .query_opt("revs_info", options.revs_info))
    }
}

/// Attach either a typed document or a pre-encoded body
pub(super) fn with_document_body<T: Serialize>(
    request: RequestBuilder,
    document: Option<&T>,
    body: Option<&Bytes>,
    content_type: Option<&str>,
) -> Result<RequestBuilder> {
    match (document, body) {
        (Some(document), _) => request.json(document),
        (None, Some(body)) => Ok(request.raw(content_type.unwrap_or("application/json"), body.clone())),
        (None, None) => Err(Error::validation("document")),
    }
}
