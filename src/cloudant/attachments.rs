//! Document attachment endpoints

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{BinaryResponse, ByteStream, HeadResponse, RequestBuilder};
use crate::models::DocumentResult;
use crate::types::StringMap;
use bytes::Bytes;
use reqwest::Method;

const ATTACHMENT_PATH: &str = "/{db}/{doc_id}/{attachment_name}";

/// Options for [`CloudantV1::head_attachment`] and [`CloudantV1::get_attachment`]
#[derive(Debug, Clone, Default)]
pub struct GetAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    /// Byte range, e.g. `bytes=0-1023`
    pub range: Option<String>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl GetAttachmentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>, attachment_name: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetAttachmentOptions {
    if_match: String,
    if_none_match: String,
    range: String,
    rev: String,
});

pub type HeadAttachmentOptions = GetAttachmentOptions;

/// Options for [`CloudantV1::put_attachment`]
#[derive(Debug, Clone, Default)]
pub struct PutAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub attachment: Bytes,
    /// MIME type stored with the attachment
    pub content_type: String,
    pub if_match: Option<String>,
    /// Revision of the owning document; omit to create the document
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl PutAttachmentOptions {
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        attachment_name: impl Into<String>,
        attachment: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            attachment: attachment.into(),
            content_type: content_type.into(),
            ..Default::default()
        }
    }
}

option_setters!(PutAttachmentOptions {
    if_match: String,
    rev: String,
});

/// Options for [`CloudantV1::delete_attachment`]
#[derive(Debug, Clone, Default)]
pub struct DeleteAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub if_match: Option<String>,
    pub rev: Option<String>,
    pub batch: Option<String>,
    pub headers: StringMap,
}

impl DeleteAttachmentOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>, attachment_name: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteAttachmentOptions {
    if_match: String,
    rev: String,
    batch: String,
});

impl CloudantV1 {
    /// Retrieve the headers of an attachment (length, type, digest)
    pub async fn head_attachment(&self, options: &HeadAttachmentOptions) -> Result<HeadResponse> {
        let request = self.attachment_request("headAttachment", Method::HEAD, options)?;
        self.http.execute_head(&request).await
    }

    /// Download an attachment
    pub async fn get_attachment(&self, options: &GetAttachmentOptions) -> Result<BinaryResponse> {
        let request = self
            .attachment_request("getAttachment", Method::GET, options)?
            .header("Accept", "*/*")
            .header_opt("Range", options.range.as_deref());
        self.http.execute_bytes(&request).await
    }

    /// Download an attachment as a byte stream
    pub async fn get_attachment_as_stream(&self, options: &GetAttachmentOptions) -> Result<ByteStream> {
        let request = self
            .attachment_request("getAttachmentAsStream", Method::GET, options)?
            .header("Accept", "*/*")
            .header_opt("Range", options.range.as_deref());
        self.http.execute_stream(&request).await
    }

    /// Upload an attachment, creating a new document revision
    pub async fn put_attachment(&self, options: &PutAttachmentOptions) -> Result<DocumentResult> {
        let params = [
            ("db", options.db.as_str()),
            ("doc_id", options.doc_id.as_str()),
            ("attachment_name", options.attachment_name.as_str()),
        ];
        require(&params)?;
        require(&[("content_type", &options.content_type)])?;
        let request = self
            .request("putAttachment", Method::PUT, ATTACHMENT_PATH, &params, &options.headers)?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .raw(options.content_type.clone(), options.attachment.clone());
        self.send(request).await
    }

    /// Remove an attachment, creating a new document revision
    pub async fn delete_attachment(&self, options: &DeleteAttachmentOptions) -> Result<DocumentResult> {
        let params = [
            ("db", options.db.as_str()),
            ("doc_id", options.doc_id.as_str()),
            ("attachment_name", options.attachment_name.as_str()),
        ];
        require(&params)?;
        let request = self
            .request("deleteAttachment", Method::DELETE, ATTACHMENT_PATH, &params, &options.headers)?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .query_opt("batch", options.batch.as_deref());
        self.send(request).await
    }

    fn attachment_request(
        &self,
        operation_id: &str,
        method: Method,
        options: &GetAttachmentOptions,
    ) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("doc_id", options.doc_id.as_str()),
            ("attachment_name", options.attachment_name.as_str()),
        ];
        require(&params)?;
        Ok(self
            .request(operation_id, method, ATTACHMENT_PATH, &params, &options.headers)?
            .header_opt("If-Match", options.if_match.as_deref())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("rev", options.rev.as_deref()))
    }
}
