//! Error types for the scanning core.
//!
//! Two families exist. [`ScanError`] ends a whole run: either the
//! configuration was rejected before traversal, or the report sink failed.
//! [`FileError`] describes why a single candidate produced no report row;
//! it is logged and counted, never propagated past the per-file pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that terminate a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Configuration rejected before any traversal.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// The report sink could not be created, written, or flushed.
    #[error("Report failure on {path}: {source}")]
    ReportFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The hashing worker pool could not be started.
    #[error("Failed to start worker pool: {message}")]
    WorkerPool { message: String },
}

impl ScanError {
    pub fn config(message: impl Into<String>) -> Self {
        ScanError::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn report(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::ReportFailed {
            path: path.into(),
            source,
        }
    }
}

/// Terminal failure states of the per-file pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Path vanished between enumeration and classification
    Missing,
    /// Symbolic link, never followed or hashed
    LinkSkipped,
    /// Directory, device, fifo, socket...
    NotRegular,
    OpenFailed,
    ReadFailed,
    /// Directory enumeration could not produce the entry
    Unreadable,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Missing => "missing",
            FailureKind::LinkSkipped => "link_skipped",
            FailureKind::NotRegular => "not_regular",
            FailureKind::OpenFailed => "open_failed",
            FailureKind::ReadFailed => "read_failed",
            FailureKind::Unreadable => "unreadable",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one candidate path produced no report row.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("[{path:?} is NOT an existing Path!]")]
    Missing { path: PathBuf },

    #[error("[{path:?} is a Link NOT a File!]")]
    LinkSkipped { path: PathBuf },

    #[error("[{path:?} is NOT a File!]")]
    NotRegular { path: PathBuf },

    #[error("Open Failed: {path:?}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read Failed: {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unreadable entry {path:?}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

impl FileError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FileError::Missing { .. } => FailureKind::Missing,
            FileError::LinkSkipped { .. } => FailureKind::LinkSkipped,
            FileError::NotRegular { .. } => FailureKind::NotRegular,
            FileError::OpenFailed { .. } => FailureKind::OpenFailed,
            FileError::ReadFailed { .. } => FailureKind::ReadFailed,
            FileError::Unreadable { .. } => FailureKind::Unreadable,
        }
    }
}
