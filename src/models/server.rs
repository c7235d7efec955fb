//! Server level information

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Response of `GET /`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerInformation {
    pub couchdb: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub features_flags: Vec<String>,
    pub vendor: ServerVendor,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerVendor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Response of `GET /_membership`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipInformation {
    pub all_nodes: Vec<String>,
    pub cluster_nodes: Vec<String>,
}

/// Response of `GET /_uuids`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UuidsResult {
    pub uuids: Vec<String>,
}

/// Response of `GET /_up`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpInformation {
    #[serde(default)]
    pub seeds: JsonValue,
    /// `ok`, `maintenance_mode` or `nolb`
    pub status: String,
}

/// Provisioned throughput blocks and what they buy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThroughputInformation {
    pub blocks: u64,
    pub query: u64,
    pub read: u64,
    pub write: u64,
}

/// Response of `/_api/v2/user/capacity/throughput`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityThroughputInformation {
    pub current: CapacityThroughputInformationCurrent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CapacityThroughputInformationTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityThroughputInformationCurrent {
    pub throughput: ThroughputInformation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityThroughputInformationTarget {
    pub throughput: ThroughputInformation,
}

/// Response of `/_api/v2/user/current/throughput`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentThroughputInformation {
    pub throughput: CurrentThroughputInformationThroughput,
}

/// Requests per second consumed in the current second
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentThroughputInformationThroughput {
    pub query: u64,
    pub read: u64,
    pub write: u64,
}

/// Event types sent to Activity Tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTrackerEvents {
    /// `management` and optionally `data`
    pub types: Vec<String>,
}

/// One entry of `GET /_active_tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_done: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub node: String,
    pub pid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u64>,
    pub started_on: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_changes: Option<u64>,
    pub r#type: String,
    pub updated_on: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_revisions_found: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions_checked: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}
