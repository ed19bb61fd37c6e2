//! Filesystem abstraction
//!
//! The runner only needs three operations: check for a directory, create one,
//! and write a text file. [`LocalFileSystem`] performs them; [`DryRunFileSystem`]
//! logs them.

use crate::domain::errors::LeafexError;
use crate::domain::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem operations used by an export run
pub trait FileSystem {
    /// Whether `path` is an existing directory
    fn directory_exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_directory(&mut self, path: &Path) -> Result<()>;

    /// Writes `content` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_text_file(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&mut self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            LeafexError::FileSystem(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn write_text_file(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| {
            LeafexError::FileSystem(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Reads the real filesystem, never writes to it
#[derive(Debug, Clone, Default)]
pub struct DryRunFileSystem {
    created: Vec<PathBuf>,
    written: Vec<PathBuf>,
}

impl DryRunFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories that would have been created
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }

    /// Files that would have been written
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FileSystem for DryRunFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir() || self.created.iter().any(|created| created == path)
    }

    fn create_directory(&mut self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "[DRY RUN] Would create directory");
        self.created.push(path.to_path_buf());
        Ok(())
    }

    fn write_text_file(&mut self, path: &Path, content: &str) -> Result<()> {
        tracing::info!(
            path = %path.display(),
            bytes = content.len(),
            "[DRY RUN] Would write text file"
        );
        self.written.push(path.to_path_buf());
        Ok(())
    }
}
