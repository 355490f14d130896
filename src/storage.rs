//! JSON persistence shared by the configuration and progress stores
//!
//! Every store keeps one pretty-printed JSON file per concern. Loading never fails:
//! a missing file yields the default record, and an unreadable or malformed file is
//! logged and replaced by the default so the application can start with blank state.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Load a record from `path`, falling back to `T::default()`
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::info!("No record at {:?}, using defaults", path);
        return T::default();
    }

    match read_json(path) {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("{}; starting from an empty record", e);
            T::default()
        }
    }
}

/// Read and parse a record, surfacing every failure
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&contents)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
}

/// Write a record to `path`
///
/// The record is written to a sibling temporary file and renamed over the target, so a
/// reader never observes a half-written file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
    }

    let contents = serde_json::to_string_pretty(value)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

    let tmp = temp_path(path);
    fs::write(&tmp, contents).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Locations of the three store files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Configuration record (`config.json`)
    pub config: PathBuf,
    /// Attempt statistics record (`stats.json`)
    pub stats: PathBuf,
    /// Completion record (`progress.json`)
    pub progress: PathBuf,
}

impl StorePaths {
    /// Keep every store file inside a single directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            config: dir.join("config.json"),
            stats: dir.join("stats.json"),
            progress: dir.join("progress.json"),
        }
    }

    /// Platform defaults: config in the config dir, progress in the data dir
    pub fn platform() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", "ctf-trainer").ok_or(StoreError::NoDataDir)?;
        Ok(Self {
            config: dirs.config_dir().join("config.json"),
            stats: dirs.data_dir().join("stats.json"),
            progress: dirs.data_dir().join("progress.json"),
        })
    }
}
