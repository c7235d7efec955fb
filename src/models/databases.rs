//! Database metadata

use super::open;
use serde::{Deserialize, Serialize};

/// Response of `GET /{db}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInformation {
    pub cluster: DatabaseInformationCluster,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub committed_update_seq: Option<String>,
    pub compact_running: bool,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub compacted_seq: Option<String>,
    pub db_name: String,
    pub disk_format_version: u64,
    pub doc_count: u64,
    pub doc_del_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default)]
    pub props: DatabaseInformationProps,
    pub sizes: ContentInformationSizes,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub update_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes: Option<PartitionedIndexesInformation>,
}

/// Shard layout of a database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInformationCluster {
    /// Number of shards
    pub q: u64,
    /// Number of replicas
    pub n: u64,
    pub w: u64,
    pub r: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInformationProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

/// Byte sizes of a database, partition or index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentInformationSizes {
    pub active: u64,
    pub external: u64,
    pub file: u64,
}

/// Partitioned index counts of a database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedIndexesInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<PartitionedIndexesDetailedInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedIndexesDetailedInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<u64>,
}

/// One entry of `POST /_dbs_info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbsInfoResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<DatabaseInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub key: String,
}
