//! Scan orchestration.
//!
//! A scan walks the root once. Every non-directory entry becomes a
//! candidate, and each candidate is classified, opened, read, hashed and
//! stat'ed by [`pipeline::process_file`]. Successes become report rows;
//! everything else is logged and counted. [`walker::Scanner`] owns the
//! report and the counters, and optionally fans the per-file work out to a
//! bounded worker pool.

/// Pre-open classification of candidate paths
pub mod classifier;

/// Per-file open, read, hash and metadata stages
pub mod pipeline;

/// Directory walk, worker pool and result accounting
pub mod walker;

pub use classifier::{classify, Classification};
pub use pipeline::process_file;
pub use walker::{run, Scanner};
