//! Partition metadata

use super::databases::PartitionedIndexesDetailedInformation;
use serde::{Deserialize, Serialize};

/// Response of `GET /{db}/_partition/{partition_key}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionInformation {
    pub db_name: String,
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub partition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes: Option<PartitionInformationIndexes>,
    pub sizes: PartitionInformationSizes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionInformationIndexes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<PartitionedIndexesDetailedInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionInformationSizes {
    pub active: u64,
    pub external: u64,
}
