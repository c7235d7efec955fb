//! Design document endpoints

use super::documents::{PostAllDocsOptions, PostAllDocsQueriesOptions};
use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::HeadResponse;
use crate::models::{AllDocsQueriesResult, AllDocsResult, DesignDocument, DesignDocumentInformation, DocumentResult};
use crate::types::StringMap;
use reqwest::Method;

/// Options for [`CloudantV1::head_design_document`]
#[derive(Debug, Clone, Default)]
pub struct HeadDesignDocumentOptions {
    pub db: String,
    /// Design document name without the `_design/` prefix
    pub ddoc: String,
    pub if_none_match: Option<String>,
    pub headers: StringMap,
}

impl HeadDesignDocumentOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Default::default()
        }
    }
}

option_setters!(HeadDesignDocumentOptions { if_none_match: String });

/// Options for [`CloudantV1::get_design_document`]
#[derive(Debug, Clone, Default)]
pub struct GetDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
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

impl GetDesignDocumentOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetDesignDocumentOptions {
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

/// Options for [`CloudantV1::put_design_document`]
#[derive(Debug, Clone, Default)]
pub struct PutDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub design_document: DesignDocument,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl PutDesignDocumentOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, design_document: DesignDocument) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            design_document,
            ..Default::default()
        }
    }
}

option_setters!(PutDesignDocumentOptions {
    if_match: String,
    batch: String,
    new_edits: bool,
    rev: String,
});

/// Options for [`CloudantV1::delete_design_document`]
#[derive(Debug, Clone, Default)]
pub struct DeleteDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl DeleteDesignDocumentOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteDesignDocumentOptions {
    if_match: String,
    batch: String,
    rev: String,
});

/// Options for [`CloudantV1::get_design_document_information`]
#[derive(Debug, Clone, Default)]
pub struct GetDesignDocumentInformationOptions {
    pub db: String,
    pub ddoc: String,
    pub headers: StringMap,
}

impl GetDesignDocumentInformationOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetDesignDocumentInformationOptions {});

/// Options for [`CloudantV1::post_design_docs`]
pub type PostDesignDocsOptions = PostAllDocsOptions;

/// Options for [`CloudantV1::post_design_docs_queries`]
pub type PostDesignDocsQueriesOptions = PostAllDocsQueriesOptions;

impl CloudantV1 {
    /// Retrieve the headers of a design document
    pub async fn head_design_document(&self, options: &HeadDesignDocumentOptions) -> Result<HeadResponse> {
        require(&[("db", &options.db), ("ddoc", &options.ddoc)])?;
        let request = self
            .request(
                "headDesignDocument",
                Method::HEAD,
                "/{db}/_design/{ddoc}",
                &[("db", &options.db), ("ddoc", &options.ddoc)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref());
        self.http.execute_head(&request).await
    }

    /// Retrieve a design document
    pub async fn get_design_document(&self, options: &GetDesignDocumentOptions) -> Result<DesignDocument> {
        require(&[("db", &options.db), ("ddoc", &options.ddoc)])?;
        let request = self
            .request(
                "getDesignDocument",
                Method::GET,
                "/{db}/_design/{ddoc}",
                &[("db", &options.db), ("ddoc", &options.ddoc)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_json("atts_since", options.atts_since.as_ref())?
            .query_opt("conflicts", options.conflicts)
            .query_opt("deleted_conflicts", options.deleted_conflicts)
            .query_opt("latest", options.latest)
            .query_opt("local_seq", options.local_seq)
            .query_opt("meta", options.meta)
            .query_opt("rev", options.rev.as_deref())
            .query_opt("revs", options.revs)
            .query_opt("revs_info", options.revs_info);
        self.send(request).await
    }

    /// Create or update a design document
    pub async fn put_design_document(&self, options: &PutDesignDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("ddoc", &options.ddoc)])?;
        let request = self
            .request(
                "putDesignDocument",
                Method::PUT,
                "/{db}/_design/{ddoc}",
                &[("db", &options.db), ("ddoc", &options.ddoc)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref())
            .json(&options.design_document)?;
        self.send(request).await
    }

    /// Delete a design document and its indexes
    pub async fn delete_design_document(&self, options: &DeleteDesignDocumentOptions) -> Result<DocumentResult> {
        require(&[("db", &options.db), ("ddoc", &options.ddoc)])?;
        let request = self
            .request(
                "deleteDesignDocument",
                Method::DELETE,
                "/{db}/_design/{ddoc}",
                &[("db", &options.db), ("ddoc", &options.ddoc)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref());
        self.send(request).await
    }

    /// Retrieve view index state of a design document
    pub async fn get_design_document_information(
        &self,
        options: &GetDesignDocumentInformationOptions,
    ) -> Result<DesignDocumentInformation> {
        require(&[("db", &options.db), ("ddoc", &options.ddoc)])?;
        let request = self.request(
            "getDesignDocumentInformation",
            Method::GET,
            "/{db}/_design/{ddoc}/_info",
            &[("db", &options.db), ("ddoc", &options.ddoc)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// List design documents
    pub async fn post_design_docs(&self, options: &PostDesignDocsOptions) -> Result<AllDocsResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "postDesignDocs",
                Method::POST,
                "/{db}/_design_docs",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }

    /// Run several design document listings in one request
    pub async fn post_design_docs_queries(
        &self,
        options: &PostDesignDocsQueriesOptions,
    ) -> Result<AllDocsQueriesResult> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "postDesignDocsQueries",
                Method::POST,
                "/{db}/_design_docs/queries",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(options)?;
        self.send(request).await
    }
}
