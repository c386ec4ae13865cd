mod file_config;

pub use file_config::{AlbumNamesConfig, FileConfig};

use crate::album::AlbumDisplayNames;
use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct FacadeConfig {
    pub db_path: PathBuf,
    pub busy_timeout: Duration,
    pub album_names: AlbumDisplayNames,
}

impl FacadeConfig {
    /// Config for `db_path` with every other setting at its default.
    pub fn new<P: Into<PathBuf>>(db_path: P) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            album_names: AlbumDisplayNames::default(),
        }
    }

    /// Resolve configuration from the host-supplied path and an optional TOML
    /// file config. TOML values override the host's where present.
    pub fn resolve(db_path: Option<PathBuf>, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or(db_path)
            .ok_or_else(|| anyhow!("db_path must be given by the host or in the config file"))?;
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }

        let busy_timeout =
            Duration::from_millis(file.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS));

        let names = file.album_names.unwrap_or_default();
        let defaults = AlbumDisplayNames::default();
        let album_names = AlbumDisplayNames {
            camera: names.camera.unwrap_or(defaults.camera),
            videos: names.videos.unwrap_or(defaults.videos),
            screenshots: names.screenshots.unwrap_or(defaults.screenshots),
            downloads: names.downloads.unwrap_or(defaults.downloads),
        };

        Ok(Self {
            db_path,
            busy_timeout,
            album_names,
        })
    }
}
