//! Cloudant Query (Mango) results and index definitions

use super::design_documents::Analyzer;
use super::documents::Document;
use super::open::{AdditionalProperties, OpenMap};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize, Serializer};

/// Response of `_find`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    pub docs: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<ExecutionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub execution_time_ms: f64,
    pub results_returned: u64,
    pub total_docs_examined: u64,
    pub total_keys_examined: u64,
    pub total_quorum_docs_examined: u64,
}

/// Response of `_explain`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering: Option<bool>,
    pub dbname: String,
    /// Either `"all_fields"` or a list of field names
    #[serde(default)]
    pub fields: JsonValue,
    pub index: IndexInformation,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrargs: Option<JsonObject>,
    #[serde(default)]
    pub opts: JsonObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ExplainResultRange>,
    pub selector: JsonObject,
    pub skip: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_candidates: Option<Vec<JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector_hints: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainResultRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<Vec<JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<Vec<JsonValue>>,
}

/// Response of `GET /{db}/_index`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexesInformation {
    pub total_rows: u64,
    pub indexes: Vec<IndexInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexInformation {
    /// Design document holding the index; `None` for the primary index
    pub ddoc: Option<String>,
    pub def: IndexDefinition,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
    /// `json`, `text` or `special`
    pub r#type: String,
}

/// Fields and options of a Query index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_field: Option<IndexTextOperatorDefaultField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IndexField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_array_lengths: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_filter_selector: Option<JsonObject>,
}

impl IndexDefinition {
    /// Index over the given fields
    pub fn fields(fields: Vec<IndexField>) -> Self {
        Self {
            fields: Some(fields),
            ..Default::default()
        }
    }
}

/// One indexed field.
///
/// Text indexes use `name` and `type`. JSON indexes use a single
/// `{"<field>": "asc"}` pair, kept in `additional_properties`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndexField {
    pub name: Option<String>,
    /// `boolean`, `number` or `string`
    pub r#type: Option<String>,
    #[serde(flatten)]
    pub additional_properties: JsonObject,
}

impl IndexField {
    /// Text index field
    pub fn text(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            r#type: Some(field_type.into()),
            additional_properties: JsonObject::new(),
        }
    }

    /// JSON index field with a sort direction (`asc` or `desc`)
    pub fn sorted(field: impl Into<String>, direction: impl Into<String>) -> Self {
        let direction: String = direction.into();
        let mut index_field = Self::default();
        index_field.set_property(field, direction);
        index_field
    }
}

impl AdditionalProperties for IndexField {
    const KNOWN_FIELDS: &'static [&'static str] = &["name", "type"];

    fn additional_properties(&self) -> &JsonObject {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut JsonObject {
        &mut self.additional_properties
    }
}

impl Serialize for IndexField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = OpenMap::new(serializer.serialize_map(None)?);
        map.entry("name", &self.name)?;
        map.entry("type", &self.r#type)?;
        map.end(&self.additional_properties)
    }
}

/// The `default_field` of a text index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexTextOperatorDefaultField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Response of `POST /{db}/_index`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    pub id: String,
    pub name: String,
    /// `created` or `exists`
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_index_field_forms() {
        let fields = vec![IndexField::sorted("price", "asc"), IndexField::text("name", "string")];
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, json!([{"price": "asc"}, {"name": "name", "type": "string"}]));

        let back: Vec<IndexField> = serde_json::from_value(value).unwrap();
        assert_eq!(back, fields);
    }

    #[test]
    fn test_sorted_field_named_like_a_typed_field() {
        let fields = vec![IndexField::sorted("name", "asc"), IndexField::sorted("type", "desc")];
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, json!([{"name": "asc"}, {"type": "desc"}]));
    }

    #[test]
    fn test_explain_fields_all_fields() {
        let explain: ExplainResult = serde_json::from_value(json!({
            "dbname": "products",
            "fields": "all_fields",
            "index": {"ddoc": null, "name": "_all_docs", "type": "special", "def": {"fields": [{"_id": "asc"}]}},
            "limit": 25,
            "opts": {},
            "selector": {"type": {"$eq": "product"}},
            "skip": 0
        }))
        .unwrap();

        assert_eq!(explain.fields, json!("all_fields"));
        assert_eq!(explain.index.r#type, "special");
        assert!(explain.index.ddoc.is_none());
    }
}
