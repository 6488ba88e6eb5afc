//! Error types for loading public land data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LandError>;
