//! Foray - public land lookup for mushroom foraging maps
//!
//! This library provides shared types and modules for the lookup and query binaries.

pub mod config;
pub mod error;
pub mod models;
pub mod pip;

pub use error::LandError;
pub use models::{GeoPoint, PublicLand, PublicLands};
pub use pip::{check_public_land, HoleMode, LandService};
