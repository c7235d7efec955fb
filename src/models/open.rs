//! Open-schema objects
//!
//! CouchDB documents carry a handful of well-known fields plus whatever the
//! application puts in them. Models with an open schema keep the known fields
//! typed and every other key in `additional_properties`. On encode both are
//! merged into one JSON object. A side-map key is dropped only when the typed
//! field of the same name was written; an unset typed field leaves the key to
//! the side-map.

use crate::types::{JsonObject, JsonValue};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Access to the keys of an open object that have no typed field
pub trait AdditionalProperties {
    /// JSON keys that map onto typed fields
    const KNOWN_FIELDS: &'static [&'static str];

    /// The untyped keys
    fn additional_properties(&self) -> &JsonObject;

    /// The untyped keys, mutably
    fn additional_properties_mut(&mut self) -> &mut JsonObject;

    /// Get an untyped property
    fn get_property(&self, key: &str) -> Option<&JsonValue> {
        self.additional_properties().get(key)
    }

    /// Set an untyped property.
    ///
    /// A key that names a typed field is ignored on encode while that field
    /// is set.
    fn set_property(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.additional_properties_mut()
            .insert(key.into(), value.into());
    }

    /// Remove an untyped property
    fn remove_property(&mut self, key: &str) -> Option<JsonValue> {
        self.additional_properties_mut().remove(key)
    }
}

/// Map writer for open objects.
///
/// Remembers the typed keys it wrote so the side-map can fill in the rest.
pub(crate) struct OpenMap<M> {
    map: M,
    written: Vec<&'static str>,
}

impl<M: SerializeMap> OpenMap<M> {
    pub(crate) fn new(map: M) -> Self {
        Self {
            map,
            written: Vec::new(),
        }
    }

    /// Write `key` only when the value is present
    pub(crate) fn entry<T: Serialize>(&mut self, key: &'static str, value: &Option<T>) -> Result<(), M::Error> {
        match value {
            Some(value) => self.field(key, value),
            None => Ok(()),
        }
    }

    /// Write a required typed field
    pub(crate) fn field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<(), M::Error> {
        self.written.push(key);
        self.map.serialize_entry(key, value)
    }

    /// Write the side-map entries not already written, then close the map
    pub(crate) fn end(mut self, extras: &JsonObject) -> Result<M::Ok, M::Error> {
        for (key, value) in extras {
            if !self.written.contains(&key.as_str()) {
                self.map.serialize_entry(key, value)?;
            }
        }
        self.map.end()
    }
}

/// Base64 on the wire, bytes in Rust (attachment `data`)
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s.as_bytes()).map_err(de::Error::custom))
            .transpose()
    }
}

/// Deserialize a value that may be a JSON string or a number into a string.
///
/// CouchDB sequence ids are opaque strings on Cloudant but plain integers on
/// a single-node CouchDB.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
