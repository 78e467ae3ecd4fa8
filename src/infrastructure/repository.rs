//! File system repository: journal root discovery and layout

use crate::error::{JournalError, Result};
use crate::infrastructure::entry_store::EntryStore;
use crate::infrastructure::kv::FileKeyValueStore;
use crate::infrastructure::media_dir::MediaDirectory;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract repository for journal operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .fjour/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .fjour/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .fjour directory exists
    fn is_initialized(&self) -> bool;

    /// Create .fjour directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root.
    /// First checks FJOUR_ROOT environment variable, then walks up from the current directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("FJOUR_ROOT") {
            let path = std::path::absolute(PathBuf::from(root_path))?;
            if Self::has_fjour_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(JournalError::Config(format!(
                    "FJOUR_ROOT is set to '{}' but no .fjour directory found. \
                    Run 'fjour init' in that directory or unset FJOUR_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_fjour_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(JournalError::NotJournalDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_fjour_dir(path: &Path) -> bool {
        path.join(".fjour").is_dir()
    }

    /// Key-value storage under .fjour/storage
    pub fn storage(&self) -> FileKeyValueStore {
        FileKeyValueStore::new(self.root.join(".fjour").join("storage"))
    }

    /// Media blobs under media/
    pub fn media_dir(&self) -> MediaDirectory {
        MediaDirectory::new(self.root.join("media"))
    }

    /// Entry store whose writes are serialized across processes through
    /// .fjour/storage/.lock
    pub fn open_entry_store(&self) -> EntryStore<FileKeyValueStore> {
        let lock_file = self.root.join(".fjour").join("storage").join(".lock");
        EntryStore::new(self.storage(), self.media_dir()).with_lock_file(lock_file)
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_fjour_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let fjour_dir = self.root.join(".fjour");

        if fjour_dir.exists() {
            return Err(JournalError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(fjour_dir.join("storage"))?;
        Ok(())
    }
}
