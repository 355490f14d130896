//! Configuration management for the content root
//!
//! Persists the active content root and every root the user has previously chosen.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage;

/// Persisted configuration record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Active content root, if any
    #[serde(default)]
    pub base_directory: Option<PathBuf>,

    /// Every root the user has added, in insertion order
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

/// Configuration store backed by a single JSON file
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: DirectoryConfig,
}

impl ConfigStore {
    /// Load configuration from `path`, or start empty if absent or malformed
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = storage::load_or_default(&path);
        tracing::info!("Configuration loaded from {:?}", path);
        Self { path, config }
    }

    /// Write `next` and adopt it; a failed write leaves the current record untouched
    fn commit(&mut self, next: DirectoryConfig) -> Result<(), StoreError> {
        storage::write_json(&self.path, &next)?;
        self.config = next;
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current record
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Active content root
    pub fn root(&self) -> Option<&Path> {
        self.config.base_directory.as_deref()
    }

    /// Make `dir` the active root and remember it
    pub fn set_root(&mut self, dir: impl AsRef<Path>) -> Result<(), StoreError> {
        let dir = existing_dir(dir.as_ref())?;

        let mut next = self.config.clone();
        if !next.directories.contains(&dir) {
            next.directories.push(dir.clone());
        }
        next.base_directory = Some(dir);
        self.commit(next)
    }

    /// Every remembered root
    pub fn known_roots(&self) -> &[PathBuf] {
        &self.config.directories
    }

    /// Remember `dir` without activating it
    ///
    /// Returns `false` when the directory was already known.
    pub fn add_root(&mut self, dir: impl AsRef<Path>) -> Result<bool, StoreError> {
        let dir = existing_dir(dir.as_ref())?;

        if self.config.directories.contains(&dir) {
            return Ok(false);
        }

        let mut next = self.config.clone();
        next.directories.push(dir.clone());
        self.commit(next)?;
        tracing::info!("Added directory to configuration: {:?}", dir);
        Ok(true)
    }

    /// Forget `dir`
    ///
    /// Removing the active root promotes the first remaining root, or leaves none.
    /// Returns `false` when the directory was not known.
    pub fn remove_root(&mut self, dir: impl AsRef<Path>) -> Result<bool, StoreError> {
        let dir = dir.as_ref();
        if !self.config.directories.iter().any(|d| d == dir) {
            return Ok(false);
        }

        let mut next = self.config.clone();
        next.directories.retain(|d| d != dir);
        if next.base_directory.as_deref() == Some(dir) {
            next.base_directory = next.directories.first().cloned();
            match &next.base_directory {
                Some(root) => tracing::info!("Updated base directory to {:?}", root),
                None => tracing::info!("No base directory set"),
            }
        }

        self.commit(next)?;
        tracing::info!("Removed directory from configuration: {:?}", dir);
        Ok(true)
    }

    /// Forget every root
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(DirectoryConfig::default())?;
        tracing::info!("Configuration cleared");
        Ok(())
    }

    /// Write the current record to `path`
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        storage::write_json(path, &self.config)?;
        tracing::info!("Configuration exported to {:?}", path);
        Ok(())
    }

    /// Replace the current record with the one stored at `path`
    ///
    /// Directories that no longer exist are dropped, and an active root that no longer
    /// exists is replaced by the first surviving directory.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let value: serde_json::Value = storage::read_json(path)?;
        if !value.is_object() {
            return Err(StoreError::InvalidFormat(format!("{:?} is not a JSON object", path)));
        }

        let mut imported: DirectoryConfig = serde_json::from_value(value)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

        imported.directories.retain(|dir| {
            let exists = dir.is_dir();
            if !exists {
                tracing::warn!("Directory from imported config does not exist: {:?}", dir);
            }
            exists
        });

        if imported.base_directory.as_ref().is_some_and(|root| !root.is_dir()) {
            imported.base_directory = imported.directories.first().cloned();
        }

        self.commit(imported)?;
        tracing::info!("Configuration imported from {:?}", path);
        Ok(())
    }
}

fn existing_dir(dir: &Path) -> Result<PathBuf, StoreError> {
    if dir.as_os_str().is_empty() || !dir.is_dir() {
        tracing::error!("Invalid directory path: {:?}", dir);
        return Err(StoreError::DirectoryNotFound(dir.to_path_buf()));
    }
    Ok(dir.to_path_buf())
}
