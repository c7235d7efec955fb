//! Geospatial query and index endpoints

use super::{require, CloudantV1};
use crate::error::Result;
use crate::http::{ByteStream, RequestBuilder};
use crate::models::{GeoIndexInformation, GeoResult, OkResult};
use crate::types::StringMap;
use reqwest::Method;

/// Options for [`CloudantV1::get_geo`]
#[derive(Debug, Clone, Default)]
pub struct GetGeoOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    /// `minLon,minLat,maxLon,maxLat`
    pub bbox: Option<String>,
    pub bookmark: Option<String>,
    /// `legacy`, `geojson`, `view` or `application/vnd.geo+json`
    pub format: Option<String>,
    /// Well-known-text geometry
    pub g: Option<String>,
    pub include_docs: Option<bool>,
    pub lat: Option<f64>,
    pub limit: Option<u64>,
    pub lon: Option<f64>,
    /// Sort by distance from `lat`/`lon` or `g`
    pub nearest: Option<bool>,
    /// Metres
    pub radius: Option<f64>,
    pub rangex: Option<f64>,
    pub rangey: Option<f64>,
    /// `contains`, `contains_properly`, `covered_by`, `covers`, `crosses`,
    /// `disjoint`, `intersects` or `overlaps`
    pub relation: Option<String>,
    pub skip: Option<u64>,
    pub stale: Option<String>,
    pub headers: StringMap,
}

impl GetGeoOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetGeoOptions {
    bbox: String,
    bookmark: String,
    format: String,
    g: String,
    include_docs: bool,
    lat: f64,
    limit: u64,
    lon: f64,
    nearest: bool,
    radius: f64,
    rangex: f64,
    rangey: f64,
    relation: String,
    skip: u64,
    stale: String,
});

/// Options for [`CloudantV1::post_geo_cleanup`]
#[derive(Debug, Clone, Default)]
pub struct PostGeoCleanupOptions {
    pub db: String,
    pub headers: StringMap,
}

impl PostGeoCleanupOptions {
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostGeoCleanupOptions {});

/// Options for [`CloudantV1::get_geo_index_information`]
#[derive(Debug, Clone, Default)]
pub struct GetGeoIndexInformationOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    pub headers: StringMap,
}

impl GetGeoIndexInformationOptions {
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            headers: StringMap::new(),
        }
    }
}

option_setters!(GetGeoIndexInformationOptions {});

impl CloudantV1 {
    /// Query a geospatial index
    pub async fn get_geo(&self, options: &GetGeoOptions) -> Result<GeoResult> {
        let request = self.geo_request("getGeo", options)?;
        self.send(request).await
    }

    /// Like [`get_geo`](Self::get_geo), streaming the raw body
    pub async fn get_geo_as_stream(&self, options: &GetGeoOptions) -> Result<ByteStream> {
        let request = self.geo_request("getGeoAsStream", options)?;
        self.http.execute_stream(&request).await
    }

    /// Remove index files no longer used by any design document
    pub async fn post_geo_cleanup(&self, options: &PostGeoCleanupOptions) -> Result<OkResult> {
        require(&[("db", &options.db)])?;
        let request = self.request(
            "postGeoCleanup",
            Method::POST,
            "/{db}/_geo_cleanup",
            &[("db", &options.db)],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Retrieve geospatial index statistics
    pub async fn get_geo_index_information(
        &self,
        options: &GetGeoIndexInformationOptions,
    ) -> Result<GeoIndexInformation> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        let request = self.request(
            "getGeoIndexInformation",
            Method::GET,
            "/{db}/_design/{ddoc}/_geo_info/{index}",
            &params,
            &options.headers,
        )?;
        self.send(request).await
    }

    fn geo_request(&self, operation_id: &str, options: &GetGeoOptions) -> Result<RequestBuilder> {
        let params = [
            ("db", options.db.as_str()),
            ("ddoc", options.ddoc.as_str()),
            ("index", options.index.as_str()),
        ];
        require(&params)?;
        Ok(self
            .request(
                operation_id,
                Method::GET,
                "/{db}/_design/{ddoc}/_geo/{index}",
                &params,
                &options.headers,
            )?
            .query_opt("bbox", options.bbox.as_deref())
            .query_opt("bookmark", options.bookmark.as_deref())
            .query_opt("format", options.format.as_deref())
            .query_opt("g", options.g.as_deref())
            .query_opt("include_docs", options.include_docs)
            .query_opt("lat", options.lat)
            .query_opt("limit", options.limit)
            .query_opt("lon", options.lon)
            .query_opt("nearest", options.nearest)
            .query_opt("radius", options.radius)
            .query_opt("rangex", options.rangex)
            .query_opt("rangey", options.rangey)
            .query_opt("relation", options.relation.as_deref())
            .query_opt("skip", options.skip)
            .query_opt("stale", options.stale.as_deref()))
    }
}
