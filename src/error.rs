//! Error types for the persistent stores and root selection

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the JSON-backed stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a store file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized or parsed
    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        /// File that was being (de)serialized
        path: PathBuf,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A directory handed to the configuration does not exist
    #[error("Directory does not exist: {0:?}")]
    DirectoryNotFound(PathBuf),

    /// An imported file was readable JSON but not a configuration record
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    /// No platform data directory could be determined
    #[error("Failed to determine the application data directory")]
    NoDataDir,
}

/// Errors raised when pointing the content repository at a new root
#[derive(Debug, Error)]
pub enum ContentError {
    /// The chosen root does not exist on disk
    #[error("Content root does not exist: {0:?}")]
    RootNotFound(PathBuf),

    /// The chosen root contains none of the known module directories
    #[error("{0:?} does not look like a CTF content directory")]
    UnrecognizedRoot(PathBuf),

    /// Persisting the new root failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContentError {
    /// Check if the user can override this error by confirming the choice
    pub fn is_confirmable(&self) -> bool {
        matches!(self, ContentError::UnrecognizedRoot(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unrecognized_root_is_confirmable() {
        assert!(ContentError::UnrecognizedRoot(PathBuf::from("/tmp")).is_confirmable());
        assert!(!ContentError::RootNotFound(PathBuf::from("/tmp")).is_confirmable());
        assert!(!ContentError::Store(StoreError::NoDataDir).is_confirmable());
    }

    #[test]
    fn store_error_mentions_path() {
        let err = StoreError::DirectoryNotFound(PathBuf::from("/missing/dir"));
        assert!(err.to_string().contains("/missing/dir"));
    }
}
