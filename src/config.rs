//! TOML configuration shared by the binaries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pip::HoleMode;

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}
fn default_use_index() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// GeoJSON FeatureCollection of public lands
    pub data_path: PathBuf,

    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub hole_mode: HoleMode,

    /// Narrow candidates with an R-tree before ray casting
    #[serde(default = "default_use_index")]
    pub use_index: bool,
}

impl Config {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            listen: default_listen(),
            hole_mode: HoleMode::default(),
            use_index: default_use_index(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Config file first, then command line overrides
    pub fn resolve(
        config: Option<&Path>,
        data: Option<&Path>,
        hole_mode: Option<HoleMode>,
    ) -> Result<Self> {
        let mut resolved = match (config, data) {
            (Some(path), _) => Self::load_from_file(path)?,
            (None, Some(data)) => Self::new(data),
            (None, None) => anyhow::bail!("either --data or --config is required"),
        };

        if let Some(data) = data {
            resolved.data_path = data.to_path_buf();
        }
        if let Some(mode) = hole_mode {
            resolved.hole_mode = mode;
        }

        Ok(resolved)
    }
}
