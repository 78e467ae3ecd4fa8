//! Configuration management

use crate::error::{JournalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_WEATHER_CITY: &str = "Pretoria";

fn default_weather_city() -> String {
    DEFAULT_WEATHER_CITY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// City or town shown in the dashboard weather card
    #[serde(default = "default_weather_city")]
    pub weather_city: String,
    pub created: DateTime<Utc>,
}

impl Config {
    pub fn new(weather_city: Option<String>) -> Self {
        Config {
            weather_city: weather_city.unwrap_or_else(default_weather_city),
            created: Utc::now(),
        }
    }

    /// Load config from .fjour/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".fjour").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JournalError::NotJournalDirectory(path.to_path_buf())
            } else {
                JournalError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| JournalError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .fjour/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let fjour_dir = path.join(".fjour");
        let config_path = fjour_dir.join("config.toml");

        if !fjour_dir.exists() {
            fs::create_dir(&fjour_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| JournalError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}
