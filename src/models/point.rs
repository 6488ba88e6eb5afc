//! Query point and bounding box types.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Geographic point (lat/lon)
///
/// Callers speak latitude first; GeoJSON geometry is longitude first.
/// Use [`GeoPoint::to_coord`] to cross that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to an `x = lon, y = lat` coordinate
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Parse "lat,lon"
impl FromStr for GeoPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(format!("expected LAT,LNG but got '{}'", s));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| format!("invalid latitude '{}'", parts[0]))?;
        let lon: f64 = parts[1]
            .parse()
            .map_err(|_| format!("invalid longitude '{}'", parts[1]))?;

        if !lat.is_finite() || !lon.is_finite() {
            return Err(format!("non-finite coordinate in '{}'", s));
        }

        Ok(Self { lat, lon })
    }
}

/// Bounding box envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: [[f64; 2]; 2], // [[minLon, maxLat], [maxLon, minLat]]
}

impl GeoBbox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            geo_type: "envelope".to_string(),
            coordinates: [[min_lon, max_lat], [max_lon, min_lat]],
        }
    }
}
