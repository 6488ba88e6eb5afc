//! Public land features as loaded from a GeoJSON FeatureCollection.

use geo::BoundingRect;
use geo_types::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use super::point::GeoBbox;

/// Geometry of a public land feature.
///
/// Only areal GeoJSON types are kept; everything else is dropped at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum LandGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl LandGeometry {
    /// Constituent polygons in document order
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            LandGeometry::Polygon(p) => std::slice::from_ref(p),
            LandGeometry::MultiPolygon(mp) => &mp.0,
        }
    }

    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            LandGeometry::Polygon(_) => "Polygon",
            LandGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// A named public land area (park, forest, seashore...)
#[derive(Debug, Clone, PartialEq)]
pub struct PublicLand {
    pub name: String,

    /// Managing agency, e.g. "NPS" or "CAL FIRE"
    pub agency: Option<String>,

    /// Access note, e.g. "Open"
    pub access: Option<String>,

    pub geometry: LandGeometry,
}

impl PublicLand {
    pub fn new(name: impl Into<String>, geometry: LandGeometry) -> Self {
        Self {
            name: name.into(),
            agency: None,
            access: None,
            geometry,
        }
    }

    /// Get the bounding box of the outer rings as (min_x, min_y, max_x, max_y)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let rect = match &self.geometry {
            LandGeometry::Polygon(p) => p.bounding_rect(),
            LandGeometry::MultiPolygon(mp) => mp.bounding_rect(),
        }?;
        Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    pub fn summary(&self) -> LandSummary {
        LandSummary {
            name: self.name.clone(),
            agency: self.agency.clone(),
            access: self.access.clone(),
            geometry_type: self.geometry.type_name(),
            bbox: self
                .bbox()
                .map(|(min_x, min_y, max_x, max_y)| GeoBbox::new(min_x, min_y, max_x, max_y)),
        }
    }
}

/// Serializable view of a [`PublicLand`] without its coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    pub geometry_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<GeoBbox>,
}

/// Counters collected while reading a FeatureCollection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub loaded: usize,
    pub skipped_malformed: usize,
    pub skipped_unsupported: usize,
}

/// Ordered collection of public lands.
///
/// Order matters: lookups report the first containing land.
#[derive(Debug, Clone, Default)]
pub struct PublicLands {
    lands: Vec<PublicLand>,
    stats: LoadStats,
}

impl PublicLands {
    pub fn new(lands: Vec<PublicLand>) -> Self {
        let stats = LoadStats {
            loaded: lands.len(),
            ..LoadStats::default()
        };
        Self { lands, stats }
    }

    pub(crate) fn with_stats(lands: Vec<PublicLand>, stats: LoadStats) -> Self {
        Self { lands, stats }
    }

    pub fn lands(&self) -> &[PublicLand] {
        &self.lands
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.lands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PublicLand> {
        self.lands.iter()
    }
}

impl FromIterator<PublicLand> for PublicLands {
    fn from_iter<I: IntoIterator<Item = PublicLand>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
