/// Application configuration
///
/// Read once at startup from `config.json` in the per-user config
/// directory. Every field is optional in the file; anything missing
/// falls back to the default below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::store::SqliteRecordStore;
use crate::error::ConfigError;

/// All tunable settings of the capture form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the `users` table
    pub database_path: PathBuf,

    /// Where scanned fingerprints are written (relative to the working directory)
    /// - Every scan overwrites the previous file
    pub fingerprint_path: PathBuf,

    /// Camera index passed to the capture backend (0 = system default)
    pub camera_index: u32,

    /// Edge length of the square preview panes, in pixels
    pub preview_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: SqliteRecordStore::default_path(),
            fingerprint_path: PathBuf::from("fingerprint.bmp"),
            camera_index: 0,
            preview_size: 200,
        }
    }
}

impl AppConfig {
    /// Get the path where the config file is looked up
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("bio-capture");
        path.push("config.json");
        path
    }

    /// Load from `path`. A missing file is not an error and yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        let path = Self::default_path();

        match Self::load(&path) {
            Ok(config) => {
                log::info!("⚙️  Config: {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to a JSON string
    #[cfg(test)]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
