//! # rust-fshash
//!
//! A one-way file system hashing tool for forensic chain of custody,
//! written in Rust.
//!
//! ## Overview
//!
//! rust-fshash walks a directory tree and records, for every regular file,
//! a cryptographic digest together with its size, ownership, mode and
//! timestamps. Results go to a CSV report; everything the tool could not
//! hash is logged and counted but never written as a row. The tool only
//! reads the evidence tree.
//!
//! ## Features
//!
//! - **Three digests**: MD5, SHA-256 or SHA-512, one per run
//! - **Never follows links**: symbolic links are logged and skipped
//! - **Bounded parallelism**: optional worker pool with a single report writer
//! - **Scan profiles**: YAML defaults for output names and worker count
//! - **Scan summary**: machine-readable JSON beside the CSV report
//!
//! ## Usage
//!
//! ```no_run
//! use rust_fshash::config::ScanConfiguration;
//! use rust_fshash::progress::ConsoleReporter;
//! use rust_fshash::scanner;
//! use rust_fshash::utils::hash::HashAlgorithm;
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ScanConfiguration::new(
//!     PathBuf::from("/mnt/evidence"),
//!     PathBuf::from("/cases/0042/fileSystemReport.csv"),
//!     HashAlgorithm::Sha256,
//! );
//!
//! let result = scanner::run(&config, &ConsoleReporter::new(true))?;
//! println!("Files Processed: {}", result.files_processed);
//! println!("Errors: {}", result.files_failed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`config`]: Scan configuration, profiles and directory validation
//! - [`scanner`]: Classification, per-file pipeline and orchestration
//! - [`utils`]: Hashing, metadata, CSV report and summary
//! - [`models`]: Core data models and structures
//! - [`error`]: Fatal and per-file error types
//! - [`progress`]: Verbose progress reporting
//! - [`constants`]: Application-wide constants
//!
//! ## Safety
//!
//! `unsafe` is limited to the `libc::access` permission probe used when
//! validating directories on Unix.

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models and structures used throughout the application
pub mod models;

/// Fatal scan errors and per-file failure outcomes
pub mod error;

/// Directory walk and per-file hashing pipeline
pub mod scanner;

/// Utility functions for hashing, metadata and reporting
pub mod utils;

/// Configuration management and scan profiles
pub mod config;

/// Verbose-only progress output
pub mod progress;

/// Application constants and configuration values
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
