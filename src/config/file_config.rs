use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Overrides the path passed by the host
    pub db_path: Option<String>,
    pub busy_timeout_ms: Option<u64>,

    pub album_names: Option<AlbumNamesConfig>,
}

/// Localized album names; any name left out keeps its default.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AlbumNamesConfig {
    pub camera: Option<String>,
    pub videos: Option<String>,
    pub screenshots: Option<String>,
    pub downloads: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
