//! Design documents and the index definitions they carry

use super::databases::ContentInformationSizes;
use super::documents::{Attachment, DocumentRevisionStatus, Revisions};
use super::open::{AdditionalProperties, OpenMap};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A design document (`_design/...`).
///
/// Views, search indexes and geospatial indexes are typed; anything else
/// stays in `additional_properties`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DesignDocument {
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
    pub autoupdate: Option<bool>,
    pub filters: Option<HashMap<String, String>>,
    /// Search indexes by name
    pub indexes: Option<HashMap<String, SearchIndexDefinition>>,
    pub language: Option<String>,
    pub options: Option<DesignDocumentOptions>,
    pub validate_doc_update: Option<String>,
    /// MapReduce views by name
    pub views: Option<HashMap<String, DesignDocumentViewsMapReduce>>,
    /// Geospatial indexes by name
    pub st_indexes: Option<HashMap<String, GeoIndexDefinition>>,
    #[serde(flatten)]
    pub additional_properties: JsonObject,
}

impl DesignDocument {
    /// Add a MapReduce view
    #[must_use]
    pub fn view(mut self, name: impl Into<String>, view: DesignDocumentViewsMapReduce) -> Self {
        self.views.get_or_insert_with(HashMap::new).insert(name.into(), view);
        self
    }

    /// Add a search index
    #[must_use]
    pub fn search_index(mut self, name: impl Into<String>, index: SearchIndexDefinition) -> Self {
        self.indexes.get_or_insert_with(HashMap::new).insert(name.into(), index);
        self
    }
}

impl AdditionalProperties for DesignDocument {
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
        "autoupdate",
        "filters",
        "indexes",
        "language",
        "options",
        "validate_doc_update",
        "views",
        "st_indexes",
    ];

    fn additional_properties(&self) -> &JsonObject {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut JsonObject {
        &mut self.additional_properties
    }
}

impl Serialize for DesignDocument {
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
        map.entry("autoupdate", &self.autoupdate)?;
        map.entry("filters", &self.filters)?;
        map.entry("indexes", &self.indexes)?;
        map.entry("language", &self.language)?;
        map.entry("options", &self.options)?;
        map.entry("validate_doc_update", &self.validate_doc_update)?;
        map.entry("views", &self.views)?;
        map.entry("st_indexes", &self.st_indexes)?;
        map.end(&self.additional_properties)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

/// JavaScript map function and optional reduce
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentViewsMapReduce {
    pub map: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

impl DesignDocumentViewsMapReduce {
    pub fn new(map: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            reduce: None,
        }
    }

    #[must_use]
    pub fn reduce(mut self, reduce: impl Into<String>) -> Self {
        self.reduce = Some(reduce.into());
        self
    }
}

/// Search index function with its analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfiguration>,
    pub index: String,
}

/// Analyzer, optionally with per-field overrides (`perfield` analyzer)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfiguration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Analyzer>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analyzer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
}

impl Analyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stopwords: None,
        }
    }
}

/// Geospatial index function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIndexDefinition {
    pub index: String,
}

/// Response of `GET /{db}/_design/{ddoc}/_info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentInformation {
    pub name: String,
    pub view_index: DesignDocumentViewIndex,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocumentViewIndex {
    #[serde(default)]
    pub collator_versions: Vec<String>,
    pub compact_running: bool,
    pub language: String,
    pub signature: String,
    pub sizes: ContentInformationSizes,
    pub updater_running: bool,
    #[serde(default)]
    pub updates_pending: UpdatesPending,
    pub waiting_clients: u64,
    pub waiting_commit: bool,
}

/// Changes an index has yet to process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatesPending {
    pub minimum: u64,
    pub preferred: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_design_document_encode() {
        let ddoc = DesignDocument {
            id: Some("_design/appliances".to_string()),
            ..Default::default()
        }
        .view(
            "by_price",
            DesignDocumentViewsMapReduce::new("function(doc) { emit(doc.price) }").reduce("_stats"),
        );

        let value = serde_json::to_value(&ddoc).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "_design/appliances",
                "views": {
                    "by_price": {"map": "function(doc) { emit(doc.price) }", "reduce": "_stats"}
                }
            })
        );
    }

    #[test]
    fn test_design_document_decode_keeps_lists() {
        let ddoc: DesignDocument = serde_json::from_value(json!({
            "_id": "_design/legacy",
            "language": "javascript",
            "lists": {"csv": "function(head, req) {}"},
            "indexes": {"text": {"index": "function(doc) { index('default', doc.name) }"}}
        }))
        .unwrap();

        assert_eq!(ddoc.language.as_deref(), Some("javascript"));
        assert!(ddoc.indexes.unwrap().contains_key("text"));
        assert!(ddoc.additional_properties.contains_key("lists"));
    }
}
