//! Revision differences and shard introspection

use super::{require, CloudantV1};
use crate::error::Result;
use crate::models::{DocumentShardInfo, RevsDiff, ShardsInformation};
use crate::types::StringMap;
use reqwest::Method;
use std::collections::HashMap;

/// Options for [`CloudantV1::post_revs_diff`]
#[derive(Debug, Clone, Default)]
pub struct PostRevsDiffOptions {
    pub db: String,
    /// Revisions to check, by document id
    pub document_revisions: HashMap<String, Vec<String>>,
    pub headers: StringMap,
}

impl PostRevsDiffOptions {
    pub fn new(db: impl Into<String>, document_revisions: HashMap<String, Vec<String>>) -> Self {
        Self {
            db: db.into(),
            document_revisions,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostRevsDiffOptions {});

/// Options for [`CloudantV1::get_shards_information`]
#[derive(Debug, Clone, Default)]
pub struct GetShardsInformationOptions {
    pub db: String,
    pub headers: StringMap,
}

impl GetShardsInformationOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetShardsInformationOptions {});

/// Options for [`CloudantV1::get_document_shards_info`]
#[derive(Debug, Clone, Default)]
pub struct GetDocumentShardsInfoOptions {
    pub db: String,
    pub doc_id: String,
    pub headers: StringMap,
}

impl GetDocumentShardsInfoOptions {
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetDocumentShardsInfoOptions {});

impl CloudantV1 {
    /// Find which of the given revisions the database is missing
    pub async fn post_revs_diff(&self, options: &PostRevsDiffOptions) -> Result<HashMap<String, RevsDiff>> {
        require(&[("db", &options.db)])?;
        let request = self
            .request(
                "postRevsDiff",
                Method::POST,
                "/{db}/_revs_diff",
                &[("db", &options.db)],
                &options.headers,
            )?
            .json(&options.document_revisions)?;
        self.send(request).await
    }

    /// List the shard ranges of a database and the nodes holding them
    pub async fn get_shards_information(&self, options: &GetShardsInformationOptions) -> Result<ShardsInformation> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "getShardsInformation",
            Method::GET,
            "/{db}/_shards",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Show which shard and nodes hold a document
    pub async fn get_document_shards_info(
        &self,
        options: &GetDocumentShardsInfoOptions,
    ) -> Result<DocumentShardInfo> {
        require(&[("db", &options.db), ("doc_id", &options.doc_id)])?;
        let request = self.request(
            "getDocumentShardsInfo",
            Method::GET,
            "/{db}/_shards/{doc_id}",
            &[("db", &options.db), ("doc_id", &options.doc_id)],
            &options.headers,
        )?;
        self.send(request).await
    }
}
