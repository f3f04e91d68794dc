//! hourboard configuration
//!
//! Stored as TOML in `<config_dir>/hourboard/config.toml` unless an explicit
//! path is given. Missing or broken files fall back to defaults.

use crate::error::LoadError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Usage thresholds (percent of available hours)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Defaults to 75%
    pub warning_threshold: Decimal,
    /// Defaults to 90%
    pub critical_threshold: Decimal,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            warning_threshold: Decimal::from(75),
            critical_threshold: Decimal::from(90),
        }
    }
}

impl AlertConfig {
    /// Thresholds must satisfy 0 < warning <= critical <= 100
    pub fn is_valid(&self) -> bool {
        Decimal::ZERO < self.warning_threshold
            && self.warning_threshold <= self.critical_threshold
            && self.critical_threshold <= Decimal::ONE_HUNDRED
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourboardConfig {
    pub alerts: AlertConfig,
    pub output: OutputConfig,
}

impl HourboardConfig {
    /// `<config_dir>/hourboard/config.toml`, when a config dir exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hourboard").join("config.toml"))
    }

    /// Parse a config file, reporting every failure
    pub fn try_load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| LoadError::TomlParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: e,
        })?;

        if !config.alerts.is_valid() {
            return Err(LoadError::Invalid {
                path: path.to_path_buf(),
                reason: "alert thresholds must satisfy 0 < warning <= critical <= 100".to_string(),
            });
        }
        Ok(config)
    }

    /// Load from `path` (or the default location).
    /// Returns defaults on any I/O or parse error (graceful degradation).
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Self::default(),
            },
        };

        match Self::try_load(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(LoadError::FileNotFound { .. }) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }
}
