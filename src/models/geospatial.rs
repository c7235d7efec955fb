//! Geospatial query results
//!
//! Geometry is a sum type keyed by the GeoJSON `type` member: the collection
//! variant holds `geometries`, every other variant holds `coordinates`.

use super::documents::Document;
use super::open::{AdditionalProperties, OpenMap};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize, Serializer};

/// A GeoJSON geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometryObject {
    Point { coordinates: Vec<JsonValue> },
    MultiPoint { coordinates: Vec<JsonValue> },
    LineString { coordinates: Vec<JsonValue> },
    MultiLineString { coordinates: Vec<JsonValue> },
    Polygon { coordinates: Vec<JsonValue> },
    MultiPolygon { coordinates: Vec<JsonValue> },
    GeometryCollection { geometries: Vec<GeoJsonGeometryObject> },
}

impl GeoJsonGeometryObject {
    /// The GeoJSON `type` member
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::MultiPoint { .. } => "MultiPoint",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiPolygon { .. } => "MultiPolygon",
            Self::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Coordinates of a simple geometry, `None` for a collection
    pub fn coordinates(&self) -> Option<&[JsonValue]> {
        match self {
            Self::Point { coordinates }
            | Self::MultiPoint { coordinates }
            | Self::LineString { coordinates }
            | Self::MultiLineString { coordinates }
            | Self::Polygon { coordinates }
            | Self::MultiPolygon { coordinates } => Some(coordinates),
            Self::GeometryCollection { .. } => None,
        }
    }

    /// Members of a collection, `None` for a simple geometry
    pub fn geometries(&self) -> Option<&[GeoJsonGeometryObject]> {
        match self {
            Self::GeometryCollection { geometries } => Some(geometries),
            _ => None,
        }
    }
}

/// A GeoJSON feature returned with `format=geojson` or `include_docs`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "_rev")]
    pub rev: Option<String>,
    pub bbox: Option<Vec<f64>>,
    pub geometry: GeoJsonGeometryObject,
    pub properties: Option<JsonObject>,
    /// Always `Feature`
    pub r#type: String,
    #[serde(flatten)]
    pub additional_properties: JsonObject,
}

impl AdditionalProperties for GeoJsonFeature {
    const KNOWN_FIELDS: &'static [&'static str] = &["_id", "_rev", "bbox", "geometry", "properties", "type"];

    fn additional_properties(&self) -> &JsonObject {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut JsonObject {
        &mut self.additional_properties
    }
}

impl Serialize for GeoJsonFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = OpenMap::new(serializer.serialize_map(None)?);
        map.entry("_id", &self.id)?;
        map.entry("_rev", &self.rev)?;
        map.entry("bbox", &self.bbox)?;
        map.field("geometry", &self.geometry)?;
        map.entry("properties", &self.properties)?;
        map.field("type", &self.r#type)?;
        map.end(&self.additional_properties)
    }
}

/// Response of a geospatial query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    /// Present with `format=geojson`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<GeoJsonFeature>>,
    #[serde(default)]
    pub rows: Vec<GeoResultRow>,
    /// `FeatureCollection` with `format=geojson`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeoJsonGeometryObject>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

/// Response of `GET /{db}/_design/{ddoc}/_geo_info/{index}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIndexInformation {
    pub geo_index: GeoIndexStats,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIndexStats {
    pub data_size: u64,
    pub disk_size: u64,
    pub doc_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_point_has_coordinates_only() {
        let geometry: GeoJsonGeometryObject =
            serde_json::from_value(json!({"type": "Point", "coordinates": [-71.06, 42.36]})).unwrap();

        assert_eq!(geometry.geometry_type(), "Point");
        assert_eq!(geometry.coordinates(), Some(&[json!(-71.06), json!(42.36)][..]));
        assert!(geometry.geometries().is_none());
    }

    #[test]
    fn test_collection_has_geometries_only() {
        let geometry: GeoJsonGeometryObject = serde_json::from_value(json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [0, 0]},
                {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            ]
        }))
        .unwrap();

        assert!(geometry.coordinates().is_none());
        let members = geometry.geometries().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].geometry_type(), "LineString");
    }

    #[test]
    fn test_unknown_geometry_type_is_rejected() {
        let result: Result<GeoJsonGeometryObject, _> =
            serde_json::from_value(json!({"type": "Circle", "coordinates": [0, 0]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_round_trip() {
        let source = json!({
            "_id": "boston",
            "geometry": {"type": "Point", "coordinates": [-71.06, 42.36]},
            "properties": {"name": "Boston"},
            "type": "Feature",
            "population": 650000
        });
        let feature: GeoJsonFeature = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(feature.get_property("population"), Some(&json!(650000)));
        assert_eq!(serde_json::to_value(&feature).unwrap(), source);
    }
}
