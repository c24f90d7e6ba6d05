//! Error types.
//!
//! Scanning is best effort: a [`ScanError`] describes one path that could not
//! contribute facts, and is collected rather than returned. Only loading a
//! render config or compiling a filter can fail outright.

use std::path::PathBuf;

use thiserror::Error;

/// A per-path scan failure. Never aborts the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The path vanished between listing and reading, or never existed.
    #[error("path does not exist: {}", path.display())]
    MissingPath { path: PathBuf },

    /// The file exists but could not be read as text.
    #[error("unreadable file {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory exists but its entries could not be listed.
    #[error("unreadable directory {}: {source}", path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::MissingPath { path }
            | Self::UnreadableFile { path, .. }
            | Self::UnreadableDirectory { path, .. } => path,
        }
    }

    /// Classify a read failure; `NotFound` means the file disappeared.
    pub(crate) fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingPath { path }
        } else {
            Self::UnreadableFile { path, source }
        }
    }
}

/// Failure to load a [`RenderConfig`](crate::config::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An invalid search filter.
#[derive(Debug, Error)]
#[error("invalid filter pattern: {0}")]
pub struct FilterError(#[from] pub regex::Error);
