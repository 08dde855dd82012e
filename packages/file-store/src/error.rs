//! Error types for key/value stores.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be mapped to a storage location.
    #[error("invalid key {key:?}: {message}")]
    InvalidKey { key: String, message: String },

    /// The root directory of a disk store is unusable.
    #[error("root path {} is invalid: {error}", path.display())]
    RootPathInvalid {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Reading or writing the record for a key failed.
    #[error("i/o error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn invalid_key_display() {
        let e = StoreError::InvalidKey {
            key: "../etc".to_string(),
            message: "parent components are not allowed".to_string(),
        };
        let display = e.to_string();
        assert!(display.contains("invalid key"));
        assert!(display.contains("../etc"));
        assert!(display.contains("parent components"));
    }

    #[test]
    fn io_error_has_source() {
        let e = StoreError::Io {
            key: "repl/history".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert!(e.to_string().contains("repl/history"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn root_path_invalid_display() {
        let e = StoreError::RootPathInvalid {
            path: PathBuf::from("/nope"),
            error: std::io::Error::other("Root path must be a directory."),
        };
        assert!(e.to_string().contains("/nope"));
    }
}
