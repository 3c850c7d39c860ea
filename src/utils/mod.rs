//! Utility functions for forensic file hashing.
//!
//! This module provides the building blocks a scan is assembled from:
//! digests, file metadata, the CSV report and the JSON scan summary.
//!
//! ## Components
//!
//! - **Hashing**: MD5, SHA-256 and SHA-512 as lowercase hex
//! - **Metadata**: Size, ownership, mode and timestamps of a file
//! - **Report**: CSV report writer, one flushed row per hashed file
//! - **Summary**: Scan summary and reporting
//!
//! ## Common Use Cases
//!
//! ### Hashing a Single File
//!
//! ```no_run
//! use rust_fshash::utils::hash::{hash_file, HashAlgorithm};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let digest = hash_file(Path::new("/evidence/suspicious.exe"), HashAlgorithm::Sha256)?;
//! println!("SHA256: {}", digest);
//! # Ok(())
//! # }
//! ```
//!
//! ### Writing a Report
//!
//! ```no_run
//! use rust_fshash::utils::report::ReportWriter;
//! use std::path::Path;
//!
//! # fn example() -> std::io::Result<()> {
//! let report = ReportWriter::create(Path::new("/tmp/fileSystemReport.csv"), "MD5")?;
//! report.close()?;
//! # Ok(())
//! # }
//! ```

/// Scan summary generation and reporting
pub mod summary;

/// Cryptographic hash calculation utilities
pub mod hash;

/// File system metadata extraction
pub mod metadata;

/// CSV report writer
pub mod report;
