//! Managed media directory

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding media blobs copied in from capture
#[derive(Debug, Clone)]
pub struct MediaDirectory {
    path: PathBuf,
}

impl MediaDirectory {
    pub fn new(path: PathBuf) -> Self {
        MediaDirectory { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory (and parents) if missing
    pub fn ensure(&self) -> Result<()> {
        if !self.path.is_dir() {
            fs::create_dir_all(&self.path)?;
        }
        Ok(())
    }

    /// Copy `source` into the directory as `filename`, returning the destination.
    /// The source file is left in place.
    pub fn copy_in(&self, source: &Path, filename: &str) -> Result<PathBuf> {
        self.ensure()?;
        let destination = self.path.join(filename);
        fs::copy(source, &destination)?;
        Ok(destination)
    }

    /// Delete a file; a file that is already gone is not an error
    pub fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of regular files directly inside the directory, sorted.
    /// A missing directory lists as empty.
    pub fn list_files(&self) -> Vec<String> {
        if !self.path.is_dir() {
            return Vec::new();
        }

        let mut names: Vec<String> = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}
