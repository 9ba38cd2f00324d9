use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for subtask-patch
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: &'static str,
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("No substitution rule matched in {}", .path.display())]
    NoMatches { path: PathBuf },
}

impl PatchError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            source: err,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn no_matches(path: impl AsRef<Path>) -> Self {
        Self::NoMatches {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// True when the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, PatchError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result alias used across the crate
pub type PatchResult<T> = std::result::Result<T, PatchError>;
