//! `_local` documents, which are never replicated

use super::documents::with_document_body;
use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{BinaryResponse, ByteStream, RequestBuilder};
use crate::models::{Document, DocumentResult};
use crate::types::StringMap;
use bytes::Bytes;
use reqwest::Method;

const LOCAL_PATH: &str = "/{db}/_local/{doc_id}";

/// Options for [`CloudantV1::get_local_document`]
#[derive(Debug, Clone, Default)]
pub struct GetLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    /// `application/json`, `multipart/mixed` or `multipart/related`
    pub accept: Option<String>,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub local_seq: Option<bool>,
    pub headers: StringMap,
}

impl GetLocalDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetLocalDocumentOptions {
    accept: String,
    if_none_match: String,
    attachments: bool,
    att_encoding_info: bool,
    local_seq: bool,
});

/// Options for [`CloudantV1::put_local_document`]
#[derive(Debug, Clone, Default)]
pub struct PutLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub document: Option<Document>,
    /// Pre-encoded body, sent instead of `document`
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    pub batch: Option<String>,
    pub headers: StringMap,
}

impl PutLocalDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>, document: Document) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            document: Some(document),
            ..Default::default()
        }
    }
}

option_setters!(PutLocalDocumentOptions {
    document: Document,
    body: Bytes,
    content_type: String,
    batch: String,
});

/// Options for [`CloudantV1::delete_local_document`]
#[derive(Debug, Clone, Default)]
pub struct DeleteLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub batch: Option<String>,
    pub headers: StringMap,
}

impl DeleteLocalDocumentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteLocalDocumentOptions { batch: String });

impl CloudantV1 {
    /// Retrieve a local document
    pub async fn get_local_document(&self, options: &GetLocalDocumentOptions) -> Result<Document> {
        let request = self.local_document_request("getLocalDocument", options)?;
        self.send(request).await
    }

    /// Retrieve a local document in the content type named by `accept`
    pub async fn get_local_document_as_bytes(&self, options: &GetLocalDocumentOptions) -> Result<BinaryResponse> {
        let request = self.local_document_request("getLocalDocumentAsBytes", options)?;
        self.http.execute_bytes(&request).await
    }

    /// Retrieve a local document as a byte stream
    pub async fn get_local_document_as_stream(&self, options: &GetLocalDocumentOptions) -> Result<ByteStream> {
        let request = self.local_document_request("getLocalDocumentAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Create or replace a local document
    pub async fn put_local_document(&self, options: &PutLocalDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "putLocalDocument",
                Method::PUT,
                LOCAL_PATH,
                &[("db", &options.db), ("doc_id", &options.doc_id)],
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

    /// Delete a local document
    pub async fn delete_local_document(&self, options: &DeleteLocalDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "deleteLocalDocument",
                Method::DELETE,
                LOCAL_PATH,
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .query_opt("batch", options.batch.as_deref());
        self.send(request).await
    }

    fn local_document_request(&self, operation_id: &str, options: &GetLocalDocumentOptions) -> Result<RequestBuilder> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let mut request = self
            .request(
                operation_id,
                Method::GET,
                LOCAL_PATH,
                &[("db", &options.db), ("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("local_seq", options.local_seq);
        if let Some(accept) = &options.accept {
            request = request.header("Accept", accept.as_str());
        }
        Ok(request)
    }
}
