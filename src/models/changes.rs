//! Changes feeds

use super::documents::Document;
use super::open;
use serde::{Deserialize, Serialize};

/// Response of `_changes` (non-continuous feeds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangesResult {
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub last_seq: Option<String>,
    #[serde(default)]
    pub pending: u64,
    pub results: Vec<ChangesResultItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangesResultItem {
    pub changes: Vec<Change>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    pub id: String,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub seq: Option<String>,
}

/// Leaf revision reported for a change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub rev: String,
}

/// Response of `_db_updates`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbUpdates {
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub last_seq: Option<String>,
    pub results: Vec<DbEvent>,
}

/// One database event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbEvent {
    pub account: Option<String>,
    pub db_name: String,
    #[serde(default, deserialize_with = "open::string_or_number")]
    pub seq: Option<String>,
    /// `created`, `updated` or `deleted`
    pub r#type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_result_with_opaque_seq() {
        let result: ChangesResult = serde_json::from_value(json!({
            "last_seq": "11-g1AAAAIbeJyV",
            "pending": 0,
            "results": [
                {"changes": [{"rev": "1-a"}], "id": "doc1", "seq": "1-g1AA"},
                {"changes": [{"rev": "2-b"}], "id": "doc2", "seq": 2, "deleted": true}
            ]
        }))
        .unwrap();

        assert_eq!(result.last_seq.as_deref(), Some("11-g1AAAAIbeJyV"));
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.results[1].seq.as_deref(), Some("2"));
        assert_eq!(result.results[1].deleted, Some(true));
    }
}
