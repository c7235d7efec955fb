//! Search (Lucene) results

use super::documents::Document;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `_search_analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalyzeResult {
    pub tokens: Vec<String>,
}

/// Response of a search query.
///
/// With `group_field` set the hits arrive in `groups` instead of `rows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(default)]
    pub rows: Vec<SearchResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<SearchResultProperties>>,
}

/// One group of a grouped search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultProperties {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(default)]
    pub rows: Vec<SearchResultRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    pub fields: JsonObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HashMap<String, Vec<String>>>,
    pub id: String,
    /// Sort order values, usually a relevance score
    #[serde(default)]
    pub order: Vec<JsonValue>,
}

/// Response of `GET /{db}/_design/{ddoc}/_search_info/{index}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchInfoResult {
    pub name: String,
    pub search_index: SearchIndexInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexInfo {
    pub committed_seq: u64,
    pub disk_size: u64,
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub pending_seq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
