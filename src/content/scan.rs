//! Tolerant directory listing

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One child of a scanned directory
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub path: PathBuf,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// List the children of `dir`, sorted by name
///
/// A missing directory yields nothing; any other I/O failure is logged and also yields
/// nothing, so callers never see a filesystem error.
pub(crate) fn entries(dir: &Path) -> Vec<Entry> {
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Directory not found: {:?}", dir);
            return Vec::new();
        }
        Err(e) => {
            tracing::error!("Failed to list {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut entries: Vec<Entry> = reader
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::error!("Failed to read entry in {:?}: {}", dir, e);
                None
            }
        })
        .map(|e| Entry { name: e.file_name().to_string_lossy().to_string(), path: e.path() })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Read a text file, trimmed; `None` (logged) if it cannot be read or is blank
pub(crate) fn read_trimmed(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let trimmed = contents.trim();
            if trimmed.is_empty() {
                tracing::debug!("Skipping empty file {:?}", path);
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(e) => {
            tracing::error!("Error reading {:?}: {}", path, e);
            None
        }
    }
}
