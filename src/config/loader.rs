//! Options file discovery and parsing.

use super::IslandOptions;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Points at an alternative options file
pub const CONFIG_ENV: &str = "NOTCH_ISLAND_CONFIG";
/// Forces debug logging when set to `1`/`true`
pub const DEBUG_ENV: &str = "NOTCH_ISLAND_DEBUG";

impl IslandOptions {
    /// Load options from the default path and apply environment overrides.
    ///
    /// A missing file is not an error. Runs before logging is set up, so
    /// failures are returned for the caller to report.
    pub fn load() -> Result<Self, ConfigError> {
        let mut options = Self::load_from_path(&Self::default_path())?;
        options.apply_debug_override(std::env::var(DEBUG_ENV).ok().as_deref());
        Ok(options)
    }

    /// `$NOTCH_ISLAND_CONFIG`, else `<config dir>/notch-island/config.toml`
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notch-island")
            .join("config.toml")
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_debug_override(&mut self, value: Option<&str>) {
        if let Some(value) = value {
            if value == "1" || value.eq_ignore_ascii_case("true") {
                self.debug = true;
            }
        }
    }
}
