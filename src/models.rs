use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::error::FailureKind;
use crate::utils::metadata::FileMetadata;

/// One report row: a file that was opened, fully read and hashed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub file_name: String,
    pub path: PathBuf,
    pub digest: String,
    pub metadata: FileMetadata,
}

/// Aggregate outcome counters for one traversal.
///
/// Every classified candidate increments exactly one of `files_processed`
/// or `files_failed`; `failures` breaks the latter down by kind.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub files_processed: usize,
    pub files_failed: usize,
    pub failures: BTreeMap<FailureKind, usize>,
    pub bytes_hashed: u64,
    #[serde(serialize_with = "serialize_duration")]
    pub elapsed: Duration,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, bytes: u64) {
        self.files_processed += 1;
        self.bytes_hashed += bytes;
    }

    pub fn record_failure(&mut self, kind: FailureKind) {
        self.files_failed += 1;
        *self.failures.entry(kind).or_insert(0) += 1;
    }

    /// Number of candidates that reached a terminal state
    pub fn candidates(&self) -> usize {
        self.files_processed + self.files_failed
    }

    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }
}

// Duration as fractional seconds
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}
