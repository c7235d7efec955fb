//! MapReduce view queries

use super::documents::Document;
use super::open;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Response of a view query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(
        default,
        deserialize_with = "open::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_seq: Option<String>,
    pub rows: Vec<ViewResultRow>,
}

/// One emitted row; `id` is absent for reduced rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: JsonValue,
    #[serde(default)]
    pub value: JsonValue,
}

/// Parameters of one view query.
///
/// Used as the body of a view request and as an element of a multi-query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub att_encoding_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key_doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_level: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key_doc_id: Option<String>,
    /// `true`, `false` or `lazy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

/// Response of a view multi-query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQueriesResult {
    pub results: Vec<ViewResult>,
}
