//! Core data models for public land lookup.

pub mod land;
pub mod point;

pub use land::{LandGeometry, LandSummary, LoadStats, PublicLand, PublicLands};
pub use point::{GeoBbox, GeoPoint};
