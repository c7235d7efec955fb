//! `_replicator` documents and the replication scheduler

use super::documents::with_document_body;
use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::HeadResponse;
use crate::models::{
    DocumentResult, ReplicationDocument, SchedulerDocsResult, SchedulerDocument, SchedulerJob, SchedulerJobsResult,
};
use crate::types::StringMap;
use bytes::Bytes;
use reqwest::Method;

/// Options for [`CloudantV1::head_replication_document`]
#[derive(Debug, Clone, Default)]
pub struct HeadReplicationDocumentOptions {
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub headers: StringMap,
}

impl HeadReplicationDocumentOptions {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(HeadReplicationDocumentOptions { if_none_match: String });

/// Options for [`CloudantV1::get_replication_document`]
#[derive(Debug, Clone, Default)]
pub struct GetReplicationDocumentOptions {
    pub doc_id: String,
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

impl GetReplicationDocumentOptions {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetReplicationDocumentOptions {
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

/// Options for [`CloudantV1::put_replication_document`]
#[derive(Debug, Clone, Default)]
pub struct PutReplicationDocumentOptions {
    pub doc_id: String,
    pub replication_document: Option<ReplicationDocument>,
    /// Pre-encoded body, sent instead of `replication_document`
    pub body: Option<Bytes>,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl PutReplicationDocumentOptions {
    pub fn new(doc_id: impl Into<String>, replication_document: ReplicationDocument) -> Self {
        Self {
            doc_id: doc_id.into(),
            replication_document: Some(replication_document),
            ..Default::default()
        }
    }
}

option_setters!(PutReplicationDocumentOptions {
    replication_document: ReplicationDocument,
    body: Bytes,
    if_match: String,
    batch: String,
    new_edits: bool,
    rev: String,
});

/// Options for [`CloudantV1::delete_replication_document`]
#[derive(Debug, Clone, Default)]
pub struct DeleteReplicationDocumentOptions {
    pub doc_id: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: StringMap,
}

impl DeleteReplicationDocumentOptions {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteReplicationDocumentOptions {
    if_match: String,
    batch: String,
    rev: String,
});

/// Options for the scheduler document endpoints
#[derive(Debug, Clone, Default)]
pub struct SchedulerDocumentOptions {
    pub doc_id: String,
    pub headers: StringMap,
}

impl SchedulerDocumentOptions {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(SchedulerDocumentOptions {});

pub type HeadSchedulerDocumentOptions = SchedulerDocumentOptions;
pub type GetSchedulerDocumentOptions = SchedulerDocumentOptions;

/// Options for [`CloudantV1::get_scheduler_docs`]
#[derive(Debug, Clone, Default)]
pub struct GetSchedulerDocsOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    /// `initializing`, `error`, `pending`, `running`, `crashing`, `completed` or `failed`
    pub states: Option<Vec<String>>,
    pub headers: StringMap,
}

impl GetSchedulerDocsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(GetSchedulerDocsOptions {
    limit: u64,
    skip: u64,
    states: Vec<String>,
});

/// Options for the scheduler job endpoints
#[derive(Debug, Clone, Default)]
pub struct SchedulerJobOptions {
    pub job_id: String,
    pub headers: StringMap,
}

impl SchedulerJobOptions {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(SchedulerJobOptions {});

pub type HeadSchedulerJobOptions = SchedulerJobOptions;
pub type GetSchedulerJobOptions = SchedulerJobOptions;

/// Options for [`CloudantV1::get_scheduler_jobs`]
#[derive(Debug, Clone, Default)]
pub struct GetSchedulerJobsOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub headers: StringMap,
}

impl GetSchedulerJobsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(GetSchedulerJobsOptions { limit: u64, skip: u64 });

impl CloudantV1 {
    /// Retrieve the headers of a replication document
    pub async fn head_replication_document(&self, options: &HeadReplicationDocumentOptions) -> Result<HeadResponse> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "headReplicationDocument",
                Method::HEAD,
                "/_replicator/{doc_id}",
                &[("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-None-Match", options.if_none_match.as_deref());
        self.http.execute_head(&request).await
    }

    /// Retrieve a replication document
    pub async fn get_replication_document(
        &self,
        options: &GetReplicationDocumentOptions,
    ) -> Result<ReplicationDocument> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "getReplicationDocument",
                Method::GET,
                "/_replicator/{doc_id}",
                &[("doc_id", &options.doc_id)],
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

    /// Create or update a replication document, which starts the replication
    pub async fn put_replication_document(&self, options: &PutReplicationDocumentOptions) -> Result<DocumentResult> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "putReplicationDocument",
                Method::PUT,
                "/_replicator/{doc_id}",
                &[("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref());
        let request = with_document_body(
            request,
            options.replication_document.as_ref(),
            options.body.as_ref(),
            None,
        )?;
        self.send(request).await
    }

    /// Cancel a replication by deleting its document
    pub async fn delete_replication_document(
        &self,
        options: &DeleteReplicationDocumentOptions,
    ) -> Result<DocumentResult> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self
            .request(
                "deleteReplicationDocument",
                Method::DELETE,
                "/_replicator/{doc_id}",
                &[("doc_id", &options.doc_id)],
                &options.headers,
            )?
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref());
        self.send(request).await
    }

    /// Check whether the scheduler knows a replication document
    pub async fn head_scheduler_document(&self, options: &HeadSchedulerDocumentOptions) -> Result<HeadResponse> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self.request(
            "headSchedulerDocument",
            Method::HEAD,
            "/_scheduler/docs/_replicator/{doc_id}",
            &[("doc_id", &options.doc_id)],
            &options.headers,
        )?;
        self.http.execute_head(&request).await
    }

    /// Retrieve the scheduler state of a replication document
    pub async fn get_scheduler_document(&self, options: &GetSchedulerDocumentOptions) -> Result<SchedulerDocument> {
        require(&[("doc_id", &options.doc_id)])?;
        let request = self.request(
            "getSchedulerDocument",
            Method::GET,
            "/_scheduler/docs/_replicator/{doc_id}",
            &[("doc_id", &options.doc_id)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// List replication documents known to the scheduler
    pub async fn get_scheduler_docs(&self, options: &GetSchedulerDocsOptions) -> Result<SchedulerDocsResult> {
        let request = self
            .request("getSchedulerDocs", Method::GET, "/_scheduler/docs", &[], &options.headers)?
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .query_list("states", options.states.as_deref());
        self.send(request).await
    }

    /// Check whether a replication job exists
    pub async fn head_scheduler_job(&self, options: &HeadSchedulerJobOptions) -> Result<HeadResponse> {
        require(&[("job_id", &options.job_id)])?;
        let request = self.request(
            "headSchedulerJob",
            Method::HEAD,
            "/_scheduler/jobs/{job_id}",
            &[("job_id", &options.job_id)],
            &options.headers,
        )?;
        self.http.execute_head(&request).await
    }

    /// Retrieve one replication job
    pub async fn get_scheduler_job(&self, options: &GetSchedulerJobOptions) -> Result<SchedulerJob> {
        require(&[("job_id", &options.job_id)])?;
        let request = self.request(
            "getSchedulerJob",
            Method::GET,
            "/_scheduler/jobs/{job_id}",
            &[("job_id", &options.job_id)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// List running replication jobs
    pub async fn get_scheduler_jobs(&self, options: &GetSchedulerJobsOptions) -> Result<SchedulerJobsResult> {
        let request = self
            .request("getSchedulerJobs", Method::GET, "/_scheduler/jobs", &[], &options.headers)?
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip);
        self.send(request).await
    }
}
