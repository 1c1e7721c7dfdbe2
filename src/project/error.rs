//! Error types for project loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a workspace or its configuration.
///
/// Inside the workspace index these are logged and the affected document is
/// skipped; they never abort a whole bootstrap.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// IO error while reading a file or directory.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace root is missing or is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file with an extension the index does not handle.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(PathBuf),

    /// Malformed configuration (alias table, tsconfig).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProjectError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
