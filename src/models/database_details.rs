//! Revision differences and shard placement

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-document entry of a `_revs_diff` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevsDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_ancestors: Option<Vec<String>>,
}

/// Response of `GET /{db}/_shards`: node list per shard range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShardsInformation {
    pub shards: HashMap<String, Vec<String>>,
}

/// Response of `GET /{db}/_shards/{doc_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentShardInfo {
    pub nodes: Vec<String>,
    pub range: String,
}
