//! Public land lookup for a query point.

use geo_types::Coord;
use tracing::debug;

use super::ray::{polygon_contains, HoleMode};
use super::LandSpatialIndex;
use crate::models::{GeoPoint, PublicLand, PublicLands};

/// First land, in iteration order, whose geometry contains `point`.
///
/// Polygons are tested one after another and the scan stops at the first hit.
pub fn find_land<'a, I>(lands: I, point: Coord<f64>, holes: HoleMode) -> Option<&'a PublicLand>
where
    I: IntoIterator<Item = &'a PublicLand>,
{
    lands.into_iter().find(|land| {
        land.geometry
            .polygons()
            .iter()
            .any(|p| polygon_contains(p, point, holes))
    })
}

/// Name of the public land containing (`lat`, `lng`), if any.
///
/// Only outer rings are consulted. A missing collection yields `None`.
pub fn check_public_land(lat: f64, lng: f64, lands: Option<&PublicLands>) -> Option<&str> {
    lookup_land(lat, lng, lands).map(|land| land.name.as_str())
}

/// Like [`check_public_land`] but returns the whole record
pub fn lookup_land(lat: f64, lng: f64, lands: Option<&PublicLands>) -> Option<&PublicLand> {
    let lands = lands?;
    find_land(lands.iter(), GeoPoint::new(lat, lng).to_coord(), HoleMode::Ignore)
}

/// Point lookup service over a loaded collection
pub struct LandService {
    lands: PublicLands,
    index: Option<LandSpatialIndex>,
    holes: HoleMode,
}

impl LandService {
    /// Create a service backed by an R-tree
    pub fn new(lands: PublicLands, holes: HoleMode) -> Self {
        let index = LandSpatialIndex::build(&lands);
        Self {
            lands,
            index: Some(index),
            holes,
        }
    }

    /// Create a service that scans every land on each query
    pub fn linear(lands: PublicLands, holes: HoleMode) -> Self {
        Self {
            lands,
            index: None,
            holes,
        }
    }

    /// Find the public land containing a point
    pub fn lookup(&self, lat: f64, lng: f64) -> Option<&PublicLand> {
        let point = GeoPoint::new(lat, lng).to_coord();

        let found = match &self.index {
            Some(index) => index.lookup(&self.lands, point, self.holes),
            None => find_land(self.lands.iter(), point, self.holes),
        };

        debug!(
            "Land lookup at ({}, {}): {}",
            lat,
            lng,
            found.map(|l| l.name.as_str()).unwrap_or("none")
        );

        found
    }

    /// Name of the land containing a point
    pub fn check(&self, lat: f64, lng: f64) -> Option<&str> {
        self.lookup(lat, lng).map(|land| land.name.as_str())
    }

    /// Keep only points that fall on some public land
    pub fn retain_public(&self, points: &[GeoPoint]) -> Vec<GeoPoint> {
        points
            .iter()
            .copied()
            .filter(|p| self.lookup(p.lat, p.lon).is_some())
            .collect()
    }

    pub fn lands(&self) -> &PublicLands {
        &self.lands
    }

    pub fn hole_mode(&self) -> HoleMode {
        self.holes
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}
