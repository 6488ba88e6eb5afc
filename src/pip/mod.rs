//! Point-in-Polygon (PIP) public land lookup.
//!
//! Loads public land boundaries from GeoJSON and answers "which land is
//! this point on" with even-odd ray casting, optionally narrowed by an
//! R-tree over bounding boxes.

mod boundary;
mod index;
mod ray;
mod service;

pub use boundary::{extract_public_lands, parse_feature, MalformedFeature};
pub use index::LandSpatialIndex;
pub use ray::{point_in_line_string, point_in_ring, polygon_contains, HoleMode};
pub use service::{check_public_land, find_land, lookup_land, LandService};
