//! Documents, attachments and bulk operations

use super::open::{self, AdditionalProperties, OpenMap};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Attachment metadata, optionally with inline data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Inline content, base64 encoded on the wire
    #[serde(default, with = "open::base64_bytes", skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revpos: Option<u64>,
    /// True when only metadata was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub: Option<bool>,
}

impl Attachment {
    /// Inline attachment
    pub fn inline(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            data: Some(data.into()),
            ..Default::default()
        }
    }
}

/// Revision history of a document (`_revisions`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revisions {
    pub ids: Vec<String>,
    pub start: u64,
}

/// Availability of one revision (`_revs_info` entry)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRevisionStatus {
    pub rev: String,
    /// `available`, `deleted` or `missing`
    pub status: String,
}

/// A CouchDB document.
///
/// The underscore fields are typed; application fields live in
/// `additional_properties`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
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
    #[serde(flatten)]
    pub additional_properties: JsonObject,
}

impl Document {
    /// Document with an id and no other fields
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Builder-style property setter
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.set_property(key, value);
        self
    }
}

impl AdditionalProperties for Document {
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
    ];

    fn additional_properties(&self) -> &JsonObject {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut JsonObject {
        &mut self.additional_properties
    }
}

impl Serialize for Document {
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
        map.end(&self.additional_properties)
    }
}

/// Outcome of a single document write.
///
/// In a bulk response a rejected document carries `error` and `reason`
/// instead of `ok`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<i64>,
}

impl DocumentResult {
    /// True when the write was rejected
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Body of `_bulk_docs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkDocs {
    pub docs: Vec<Document>,
    /// When false, revisions are stored as given (replication mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_edits: Option<bool>,
}

impl BulkDocs {
    pub fn new(docs: Vec<Document>) -> Self {
        Self {
            docs,
            new_edits: None,
        }
    }
}

/// One entry of a `_bulk_get` request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkGetQueryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atts_since: Option<Vec<String>>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl BulkGetQueryDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }
}

/// Response of `_bulk_get`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResult {
    pub results: Vec<BulkGetResultItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResultItem {
    pub docs: Vec<BulkGetResultDocument>,
    pub id: String,
}

/// Either the document or the reason it could not be read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkGetResultDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DocumentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Document>,
}

/// Response of `_all_docs` and design document listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllDocsResult {
    #[serde(default)]
    pub total_rows: u64,
    pub rows: Vec<DocsResultRow>,
    #[serde(
        default,
        deserialize_with = "open::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_seq: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocsResultRow {
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
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<DocsResultRowValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocsResultRowValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    pub rev: String,
}

/// Parameters of one `_all_docs` query.
///
/// Used as the body of `_all_docs` and as an element of `_all_docs/queries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllDocsQuery {
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
    pub end_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<String>,
}

/// Response of `_all_docs/queries`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllDocsQueriesResult {
    pub results: Vec<AllDocsResult>,
}

/// Plain `{"ok": true}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OkResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
}
