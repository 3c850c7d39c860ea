//! Global constants for the rust-fshash application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Default file names
/// Report written inside the report directory
pub const DEFAULT_REPORT_NAME: &str = "fileSystemReport.csv";

/// Persistent debug log written inside the report directory
pub const DEFAULT_LOG_NAME: &str = "fileSystemHashLog.log";

/// JSON scan summary written inside the report directory
pub const DEFAULT_SUMMARY_NAME: &str = "scanSummary.json";

/// Scan profile written by `init-config` when no path is given
pub const DEFAULT_PROFILE_NAME: &str = "scan_profile.yaml";

// Report layout
/// Columns preceding the digest column
pub const REPORT_LEADING_COLUMNS: &[&str] = &[
    "File",
    "Path",
    "Size",
    "Modified Time",
    "Access Time",
    "Created Time",
];

/// Columns following the digest column
pub const REPORT_TRAILING_COLUMNS: &[&str] = &["Owner", "Group", "Mode"];

/// Calendar layout of the C `ctime()` function, e.g. `Thu Oct 18 09:05:01 2026`
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

// Worker pool
/// Default number of hashing workers (sequential scan)
pub const DEFAULT_WORKERS: usize = 1;

/// Completed outcomes buffered per worker before workers block on the writer
pub const OUTCOME_QUEUE_PER_WORKER: usize = 4;

/// Emit an info-level progress line every this many candidates
pub const PROGRESS_LOG_INTERVAL: usize = 10_000;

// Error messages
pub const ERROR_DIRECTORY_MISSING: &str = "Directory does not exist!";
pub const ERROR_DIRECTORY_UNREADABLE: &str = "Directory is not readable!";
pub const ERROR_DIRECTORY_UNWRITABLE: &str = "Directory is not writable!";
pub const ERROR_NO_ALGORITHM: &str = "Hash Type should be either md5, sha256, or sha512!";
