//! Config management use case

use crate::error::{JournalError, Result};
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "weather_city" => Ok(config.weather_city),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(JournalError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: weather_city, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "weather_city" => {
                let city = value.trim();
                if city.is_empty() {
                    return Err(JournalError::Config(
                        "weather_city cannot be empty".to_string(),
                    ));
                }
                config.weather_city = city.to_string();
            }
            "created" => {
                return Err(JournalError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(JournalError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: weather_city",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new(None)).unwrap();
        ConfigService::new(repo)
    }

    #[test]
    fn test_set_and_get_weather_city() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("weather_city", " Nelspruit ").unwrap();

        assert_eq!(service.get("weather_city").unwrap(), "Nelspruit");
    }

    #[test]
    fn test_created_is_read_only() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("created", "2020-01-01T00:00:00Z").is_err());
        assert!(!service.get("created").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_and_empty_values_rejected() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.get("theme").is_err());
        assert!(service.set("theme", "dark").is_err());
        assert!(service.set("weather_city", "  ").is_err());
    }
}
