//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;

/// Initialize a new journal at the specified path.
pub fn init(path: &Path, weather_city: Option<String>) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    // Media URIs are stored as absolute paths, so the root must be absolute too
    let root = fs::canonicalize(path)?;
    let repo = FileSystemRepository::new(root);

    repo.initialize()?;

    let config = Config::new(weather_city);
    repo.save_config(&config)?;

    println!("Initialized fjour journal at {}", repo.root.display());
    println!("Weather city: {}", config.weather_city);

    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("farm");

        let repo = init(&target, None).unwrap();

        assert!(repo.root.is_absolute());
        assert!(target.join(".fjour/config.toml").exists());
        assert!(target.join(".fjour/storage").is_dir());
        assert_eq!(repo.load_config().unwrap().weather_city, "Pretoria");
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), None).unwrap();
        assert!(init(temp.path(), None).is_err());
    }
}
