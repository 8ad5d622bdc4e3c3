//! Fieldtrack configuration.
//!
//! Loaded from `~/.fieldtrack/config.toml`. Every key is optional; a missing
//! file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::filter::{DEFAULT_MAX_ACCURACY_M, DEFAULT_MAX_JUMP_KM, SampleFilter};
use crate::storage::Storage;

const DEFAULT_SHARE_BASE: &str = "https://fieldtrack.local/";

/// Fieldtrack configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Samples reporting a worse accuracy radius (metres) are dropped.
    pub max_accuracy_m: f64,

    /// Samples farther than this (km) from the last accepted point are dropped.
    pub max_jump_km: f64,

    /// Origin and path that share links are built on.
    pub share_base: String,

    /// Store file. Defaults to `~/.fieldtrack/store.sqlite`.
    pub store: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_accuracy_m: DEFAULT_MAX_ACCURACY_M,
            max_jump_km: DEFAULT_MAX_JUMP_KM,
            share_base: DEFAULT_SHARE_BASE.to_string(),
            store: None,
        }
    }
}

impl Config {
    /// Load config from `~/.fieldtrack/config.toml`.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if !(config.max_accuracy_m >= 0.0 && config.max_jump_km >= 0.0) {
            return Err(format!(
                "max-accuracy-m and max-jump-km must be non-negative in {}",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.fieldtrack/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fieldtrack").join("config.toml"))
    }

    /// Sample filter built from the configured thresholds.
    pub fn filter(&self) -> SampleFilter {
        SampleFilter {
            max_accuracy_m: self.max_accuracy_m,
            max_jump_km: self.max_jump_km,
        }
    }

    /// The store file to open.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store.clone().or_else(Storage::default_path)
    }
}
