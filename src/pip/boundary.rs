//! Public land extraction from GeoJSON.
//!
//! The document is walked as a `serde_json::Value` so that one broken feature
//! only drops that feature instead of failing the whole collection.

use std::path::Path;

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{LandError, Result};
use crate::models::{LandGeometry, LoadStats, PublicLand, PublicLands};

/// Why a single feature was dropped
#[derive(Debug, Error, PartialEq)]
pub enum MalformedFeature {
    #[error("feature is not an object")]
    NotAnObject,
    #[error("missing geometry")]
    MissingGeometry,
    #[error("missing geometry type")]
    MissingType,
    #[error("missing coordinates")]
    MissingCoordinates,
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),
    #[error("missing name property")]
    MissingName,
}

impl PublicLands {
    /// Parse a GeoJSON FeatureCollection from text.
    ///
    /// Only unparseable JSON is an error. A document without a `features`
    /// array produces an empty collection.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        Ok(extract_public_lands(&doc))
    }

    /// Build from an already parsed GeoJSON value
    pub fn from_value(doc: &Value) -> Self {
        extract_public_lands(doc)
    }

    /// Read and parse a GeoJSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LandError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loading public lands from {}", path.display());
        Self::from_json_str(&text)
    }
}

/// Extract public lands from a FeatureCollection, keeping document order
pub fn extract_public_lands(doc: &Value) -> PublicLands {
    let features = match doc.get("features").and_then(Value::as_array) {
        Some(f) => f,
        None => {
            debug!("GeoJSON document has no features array");
            return PublicLands::default();
        }
    };

    let mut lands = Vec::with_capacity(features.len());
    let mut stats = LoadStats::default();

    for (i, feature) in features.iter().enumerate() {
        match parse_feature(feature) {
            Ok(Some(land)) => lands.push(land),
            Ok(None) => stats.skipped_unsupported += 1,
            Err(e) => {
                warn!("Skipping feature #{}: {}", i, e);
                stats.skipped_malformed += 1;
            }
        }
    }

    stats.loaded = lands.len();
    info!(
        "Loaded {} public lands ({} malformed, {} unsupported skipped)",
        stats.loaded, stats.skipped_malformed, stats.skipped_unsupported
    );

    PublicLands::with_stats(lands, stats)
}

/// Parse one feature. `Ok(None)` means a well-formed but non-areal geometry.
pub fn parse_feature(feature: &Value) -> std::result::Result<Option<PublicLand>, MalformedFeature> {
    let obj = feature.as_object().ok_or(MalformedFeature::NotAnObject)?;

    let geometry = obj
        .get("geometry")
        .filter(|g| !g.is_null())
        .ok_or(MalformedFeature::MissingGeometry)?;

    let geo_type = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or(MalformedFeature::MissingType)?;

    let geometry = match geo_type {
        "Polygon" => LandGeometry::Polygon(parse_polygon(coordinates(geometry)?)?),
        "MultiPolygon" => {
            let parts = coordinates(geometry)?
                .as_array()
                .ok_or(MalformedFeature::InvalidCoordinates("multipolygon is not an array"))?
                .iter()
                .map(parse_polygon)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            LandGeometry::MultiPolygon(MultiPolygon::new(parts))
        }
        other => {
            debug!("Ignoring {} geometry", other);
            return Ok(None);
        }
    };

    let properties = obj.get("properties");
    let name = property(properties, "name").ok_or(MalformedFeature::MissingName)?;

    Ok(Some(PublicLand {
        name,
        agency: property(properties, "agency"),
        access: property(properties, "access"),
        geometry,
    }))
}

fn coordinates(geometry: &Value) -> std::result::Result<&Value, MalformedFeature> {
    geometry
        .get("coordinates")
        .filter(|c| !c.is_null())
        .ok_or(MalformedFeature::MissingCoordinates)
}

fn property(properties: Option<&Value>, key: &str) -> Option<String> {
    properties?.get(key)?.as_str().map(str::to_string)
}

/// `[[[lng, lat], ...], ...]` where ring 0 is the outer boundary
fn parse_polygon(value: &Value) -> std::result::Result<Polygon<f64>, MalformedFeature> {
    let rings = value
        .as_array()
        .ok_or(MalformedFeature::InvalidCoordinates("polygon is not an array"))?;

    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings
        .next()
        .ok_or(MalformedFeature::InvalidCoordinates("polygon has no rings"))??;
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> std::result::Result<LineString<f64>, MalformedFeature> {
    let positions = value
        .as_array()
        .ok_or(MalformedFeature::InvalidCoordinates("ring is not an array"))?;

    positions
        .iter()
        .map(parse_position)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// `[lng, lat, ...]`; altitude and further values are ignored
fn parse_position(value: &Value) -> std::result::Result<Coord<f64>, MalformedFeature> {
    let pos = value
        .as_array()
        .ok_or(MalformedFeature::InvalidCoordinates("position is not an array"))?;

    match (pos.first().and_then(Value::as_f64), pos.get(1).and_then(Value::as_f64)) {
        (Some(x), Some(y)) => Ok(Coord { x, y }),
        _ => Err(MalformedFeature::InvalidCoordinates("position needs two numbers")),
    }
}
