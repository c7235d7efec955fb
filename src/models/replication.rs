//! Replication documents and scheduler state

use super::documents::{Attachment, DocumentRevisionStatus, Revisions};
use super::open::{self, AdditionalProperties, OpenMap};
use crate::types::{JsonObject, JsonValue, StringMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A document in the `_replicator` database
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplicationDocument {
    #[serde(rename = "_attachments")]
    pub attachments: Option<HashMap<String, Attachment>>,
    #[serde(rename = "_conflicts")]
    pub conflicts: Option<Vec<String>>,
    #[serde(rename = "_deleted")]
    pub deleted: Option<bool>,
    #[serde(rename = "_deleted_conflicts")]
    pub deleted_conflicts: Option<Vec<String>>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Kept as sent: a string on Cloudant, an integer on CouchDB
    #[serde(rename = "_local_seq")]
    pub local_seq: Option<JsonValue>,
    #[serde(rename = "_rev")]
    pub rev: Option<String>,
    #[serde(rename = "_revisions")]
    pub revisions: Option<Revisions>,
    #[serde(rename = "_revs_info")]
    pub revs_info: Option<Vec<DocumentRevisionStatus>>,
    pub cancel: Option<bool>,
    pub checkpoint_interval: Option<u64>,
    pub connection_timeout: Option<u64>,
    pub continuous: Option<bool>,
    pub create_target: Option<bool>,
    pub create_target_params: Option<ReplicationCreateTargetParameters>,
    pub doc_ids: Option<Vec<String>>,
    pub filter: Option<String>,
    pub http_connections: Option<u64>,
    pub owner: Option<String>,
    pub query_params: Option<StringMap>,
    pub retries_per_request: Option<u64>,
    pub selector: Option<JsonObject>,
    pub since_seq: Option<String>,
    pub socket_options: Option<String>,
    pub source: Option<ReplicationDatabase>,
    pub source_proxy: Option<String>,
    pub target: Option<ReplicationDatabase>,
    pub target_proxy: Option<String>,
    pub use_bulk_get: Option<bool>,
    pub use_checkpoints: Option<bool>,
    pub user_ctx: Option<UserContext>,
    pub winning_revs_only: Option<bool>,
    pub worker_batch_size: Option<u64>,
    pub worker_processes: Option<u64>,
    #[serde(flatten)]
    pub additional_properties: JsonObject,
}

impl ReplicationDocument {
    /// Replication from `source` to `target`
    pub fn new(source: ReplicationDatabase, target: ReplicationDatabase) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            ..Default::default()
        }
    }
}

impl AdditionalProperties for ReplicationDocument {
    const KNOWN_FIELDS: &'static [&'static str] = &[
        "_attachments",
        "_conflicts",
        "_deleted",
        "_deleted_conflicts",
        "_id",
        "_local_seq",
        "_rev",
        "_revisions",
        "_revs_info",
        "cancel",
        "checkpoint_interval",
        "connection_timeout",
        "continuous",
        "create_target",
        "create_target_params",
        "doc_ids",
        "filter",
        "http_connections",
        "owner",
        "query_params",
        "retries_per_request",
        "selector",
        "since_seq",
        "socket_options",
        "source",
        "source_proxy",
        "target",
        "target_proxy",
        "use_bulk_get",
        "use_checkpoints",
        "user_ctx",
        "winning_revs_only",
        "worker_batch_size",
        "worker_processes",
    ];

    fn additional_properties(&self) -> &JsonObject {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut JsonObject {
        &mut self.additional_properties
    }
}

impl Serialize for ReplicationDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = OpenMap::new(serializer.serialize_map(None)?);
        map.entry("_attachments", &self.attachments)?;
        map.entry("_conflicts", &self.conflicts)?;
        map.entry("_deleted", &self.deleted)?;
        map.entry("_deleted_conflicts", &self.deleted_conflicts)?;
        map.entry("_id", &self.id)?;
        map.entry("_local_seq", &self.local_seq)?;
        map.entry("_rev", &self.rev)?;
        map.entry("_revisions", &self.revisions)?;
        map.entry("_revs_info", &self.revs_info)?;
        map.entry("cancel", &self.cancel)?;
        map.entry("checkpoint_interval", &self.checkpoint_interval)?;
        map.entry("connection_timeout", &self.connection_timeout)?;
        map.entry("continuous", &self.continuous)?;
        map.entry("create_target", &self.create_target)?;
        map.entry("create_target_params", &self.create_target_params)?;
        map.entry("doc_ids", &self.doc_ids)?;
        map.entry("filter", &self.filter)?;
        map.entry("http_connections", &self.http_connections)?;
        map.entry("owner", &self.owner)?;
        map.entry("query_params", &self.query_params)?;
        map.entry("retries_per_request", &self.retries_per_request)?;
        map.entry("selector", &self.selector)?;
        map.entry("since_seq", &self.since_seq)?;
        map.entry("socket_options", &self.socket_options)?;
        map.entry("source", &self.source)?;
        map.entry("source_proxy", &self.source_proxy)?;
        map.entry("target", &self.target)?;
        map.entry("target_proxy", &self.target_proxy)?;
        map.entry("use_bulk_get", &self.use_bulk_get)?;
        map.entry("use_checkpoints", &self.use_checkpoints)?;
        map.entry("user_ctx", &self.user_ctx)?;
        map.entry("winning_revs_only", &self.winning_revs_only)?;
        map.entry("worker_batch_size", &self.worker_batch_size)?;
        map.entry("worker_processes", &self.worker_processes)?;
        map.end(&self.additional_properties)
    }
}

/// Options for a target database created by the replicator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationCreateTargetParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<u64>,
}

/// Replication endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<ReplicationDatabaseAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<StringMap>,
    pub url: String,
}

impl ReplicationDatabase {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Authenticate to this endpoint with an IAM API key
    #[must_use]
    pub fn iam(mut self, api_key: impl Into<String>) -> Self {
        self.auth = Some(ReplicationDatabaseAuth {
            iam: Some(ReplicationDatabaseAuthIam {
                api_key: api_key.into(),
            }),
            basic: None,
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<ReplicationDatabaseAuthBasic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<ReplicationDatabaseAuthIam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthBasic {
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthIam {
    pub api_key: String,
}

/// User a replication runs as; also the `userCtx` of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response of `GET /_scheduler/docs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerDocsResult {
    pub total_rows: u64,
    pub docs: Vec<SchedulerDocument>,
}

/// Scheduler view of one replication document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerDocument {
    pub database: String,
    pub doc_id: String,
    #[serde(default)]
    pub error_count: u64,
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SchedulerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub node: Option<String>,
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// `initializing`, `error`, `pending`, `running`, `crashing`, `completed` or `failed`
    pub state: String,
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_proxy: Option<String>,
}

/// Replication progress counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_pending: Option<u64>,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub checkpointed_source_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_revisions_found: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions_checked: Option<u64>,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub source_seq: Option<String>,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub through_seq: Option<String>,
}

/// Response of `GET /_scheduler/jobs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJobsResult {
    pub total_rows: u64,
    pub jobs: Vec<SchedulerJob>,
}

/// A running replication job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJob {
    pub database: Option<String>,
    pub doc_id: Option<String>,
    #[serde(default)]
    pub history: Vec<SchedulerJobEvent>,
    pub id: String,
    #[serde(default)]
    pub info: SchedulerInfo,
    pub node: String,
    pub pid: Option<String>,
    pub source: String,
    pub start_time: DateTime<Utc>,
    pub target: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerJobEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub r#type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_replication_document_encode() {
        let mut doc = ReplicationDocument::new(
            ReplicationDatabase::new("https://source.example/db").iam("src-key"),
            ReplicationDatabase::new("https://target.example/db"),
        );
        doc.id = Some("repldoc-example".to_string());
        doc.create_target = Some(true);
        doc.set_property("x_custom", "kept");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "repldoc-example",
                "create_target": true,
                "source": {"auth": {"iam": {"api_key": "src-key"}}, "url": "https://source.example/db"},
                "target": {"url": "https://target.example/db"},
                "x_custom": "kept"
            })
        );
    }

    #[test]
    fn test_scheduler_doc_timestamps() {
        let doc: SchedulerDocument = serde_json::from_value(json!({
            "database": "_replicator",
            "doc_id": "repldoc-example",
            "error_count": 0,
            "id": null,
            "last_updated": "2024-03-01T10:15:00Z",
            "start_time": "2024-03-01T10:14:58Z",
            "state": "completed",
            "node": null,
            "source": "https://source.example/db/",
            "target": "https://target.example/db/"
        }))
        .unwrap();

        assert_eq!(doc.state, "completed");
        assert!(doc.last_updated.unwrap() > doc.start_time.unwrap());
    }
}
