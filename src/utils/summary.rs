use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;
use anyhow::{Result, Context};

use crate::config::ScanConfiguration;
use crate::models::ScanResult;

/// Create a JSON summary of one scan.
///
/// The summary records who scanned what, when, with which algorithm, and the
/// outcome counters. It sits beside the CSV report as the machine-readable
/// chain of custody record for the run.
///
/// # Arguments
///
/// * `hostname` - The hostname of the system where the scan ran
/// * `config` - The configuration the scan ran with
/// * `result` - Final counters of the scan
/// * `started_at` - Wall clock time the walk started
/// * `finished_at` - Wall clock time the report was closed
///
/// # Example Output
///
/// ```json
/// {
///   "scan_id": "550e8400-e29b-41d4-a716-446655440000",
///   "hostname": "workstation-01",
///   "algorithm": "SHA256",
///   "files_processed": 42,
///   "files_failed": 1,
///   "failures": { "link_skipped": 1 },
///   ...
/// }
/// ```
pub fn create_scan_summary(
    hostname: &str,
    config: &ScanConfiguration,
    result: &ScanResult,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
) -> Result<String> {
    let summary = json!({
        "scan_id": Uuid::new_v4().to_string(),
        "hostname": hostname,
        "os": std::env::consts::OS,
        "tool_version": env!("CARGO_PKG_VERSION"),
        "root_path": config.root.to_string_lossy(),
        "report_path": config.report_path.to_string_lossy(),
        "algorithm": config.algorithm.label(),
        "workers": config.workers,
        "started_at": started_at.to_rfc3339(),
        "finished_at": finished_at.to_rfc3339(),
        "elapsed_seconds": result.elapsed.as_secs_f64(),
        "files_processed": result.files_processed,
        "files_failed": result.files_failed,
        "bytes_hashed": result.bytes_hashed,
        "failures": result.failures,
    });

    serde_json::to_string_pretty(&summary).context("Failed to serialize scan summary to JSON")
}
