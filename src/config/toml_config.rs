use crate::config::{DashboardConfig, FeedsConfig};
use crate::domain::model::MapView;
use crate::utils::error::{QuakeMapError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of a `quake-map.toml` file. Every table is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub feeds: Option<FeedsSection>,
    pub map: Option<MapView>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedsSection {
    pub earthquakes_url: Option<String>,
    pub plates_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text without touching the filesystem.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| QuakeMapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Fills every missing table or key from the built-in defaults.
    pub fn to_dashboard_config(&self) -> DashboardConfig {
        let defaults = FeedsConfig::default();
        let feeds = self.feeds.clone().unwrap_or_default();

        DashboardConfig {
            feeds: FeedsConfig {
                earthquakes_url: feeds.earthquakes_url.unwrap_or(defaults.earthquakes_url),
                plates_url: feeds.plates_url.unwrap_or(defaults.plates_url),
            },
            map: self.map.clone().unwrap_or_default(),
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_dashboard_config().validate()
    }
}
