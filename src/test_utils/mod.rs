//! Test utilities for rust-fshash
//!
//! Common fixtures and assertion helpers shared by the unit test modules.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Creates a temporary directory that is automatically cleaned up
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a temporary file with the given content
pub fn create_temp_file(content: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

/// Creates a small evidence tree with nested directories and an empty file.
///
/// Layout:
///
/// ```text
/// notes.txt          "evidence"
/// logs/auth.log      "login accepted"
/// logs/empty.log     ""
/// deep/a/b/c.bin     [0, 1, 2, 255]
/// deep/a/d.txt       "xyz"
/// ```
pub fn create_test_tree() -> Result<TempDir> {
    let temp_dir = create_temp_dir()?;
    let base_path = temp_dir.path();

    fs::create_dir_all(base_path.join("logs"))?;
    fs::create_dir_all(base_path.join("deep/a/b"))?;

    fs::write(base_path.join("notes.txt"), b"evidence")?;
    fs::write(base_path.join("logs/auth.log"), b"login accepted")?;
    fs::write(base_path.join("logs/empty.log"), b"")?;
    fs::write(base_path.join("deep/a/b/c.bin"), [0u8, 1, 2, 255])?;
    fs::write(base_path.join("deep/a/d.txt"), b"xyz")?;

    Ok(temp_dir)
}

/// Number of regular files laid down by [`create_test_tree`]
pub const TEST_TREE_FILES: usize = 5;

/// Total content bytes laid down by [`create_test_tree`]
pub const TEST_TREE_BYTES: u64 = 29;

/// Assertion helpers for custom types
pub mod assertions {
    use crate::models::{FileRecord, ScanResult};
    use crate::utils::hash::HashAlgorithm;

    /// Assert that a record carries a well-formed digest for `algorithm`
    pub fn assert_record_digest(record: &FileRecord, algorithm: HashAlgorithm) {
        assert_eq!(record.digest.len(), algorithm.hex_len(), "Digest length mismatch");
        assert!(
            record.digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "Digest must be lowercase hex: {}",
            record.digest
        );
    }

    /// Assert that the counters add up to the number of candidates seen
    pub fn assert_counts_consistent(result: &ScanResult) {
        let by_kind: usize = result.failures.values().sum();
        assert_eq!(by_kind, result.files_failed, "Failure breakdown mismatch");
        assert_eq!(
            result.candidates(),
            result.files_processed + result.files_failed,
            "Candidate count mismatch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfiguration;
    use crate::models::FileRecord;
    use crate::progress::SilentReporter;
    use crate::scanner::Scanner;
    use crate::utils::hash::HashAlgorithm;

    #[test]
    fn test_tree_fixture_matches_constants() {
        let tree = create_test_tree().unwrap();
        let reports = create_temp_dir().unwrap();
        let config = ScanConfiguration::new(
            tree.path().to_path_buf(),
            reports.path().join("report.csv"),
            HashAlgorithm::Sha256,
        );

        let mut records: Vec<FileRecord> = Vec::new();
        let result = Scanner::new(&config, &SilentReporter)
            .scan_into(&mut records)
            .unwrap();

        assert_eq!(result.files_processed, TEST_TREE_FILES);
        assert_eq!(result.bytes_hashed, TEST_TREE_BYTES);
        assertions::assert_counts_consistent(&result);
        for record in &records {
            assertions::assert_record_digest(record, HashAlgorithm::Sha256);
        }
    }
}
