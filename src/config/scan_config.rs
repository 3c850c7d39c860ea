use std::path::PathBuf;

use log::debug;

use crate::cli::Args;
use crate::config::profile::ScanProfile;
use crate::config::validation::{validate_readable_directory, validate_writable_directory};
use crate::constants::{DEFAULT_WORKERS, ERROR_NO_ALGORITHM};
use crate::error::ScanError;
use crate::utils::hash::HashAlgorithm;

/// Immutable settings for one scan, resolved once before traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfiguration {
    pub root: PathBuf,
    /// Full path of the CSV report file
    pub report_path: PathBuf,
    pub algorithm: HashAlgorithm,
    pub verbose: bool,
    /// 1 runs the walk sequentially
    pub workers: usize,
    pub summary_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl ScanConfiguration {
    /// Minimal sequential configuration with no summary or log file
    pub fn new(root: PathBuf, report_path: PathBuf, algorithm: HashAlgorithm) -> Self {
        ScanConfiguration {
            root,
            report_path,
            algorithm,
            verbose: false,
            workers: DEFAULT_WORKERS,
            summary_path: None,
            log_path: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_summary_path(mut self, path: Option<PathBuf>) -> Self {
        self.summary_path = path;
        self
    }

    pub fn with_log_path(mut self, path: Option<PathBuf>) -> Self {
        self.log_path = path;
        self
    }

    /// Resolve parsed arguments and an optional profile into a configuration.
    ///
    /// Fails with `ConfigInvalid` when the root is not a readable directory,
    /// the report directory is not writable, or no algorithm was selected.
    pub fn from_args(args: &Args, profile: &ScanProfile) -> Result<Self, ScanError> {
        let algorithm = args
            .algorithm
            .selected()
            .ok_or_else(|| ScanError::config(ERROR_NO_ALGORITHM))?;

        let root = args
            .root_path
            .as_deref()
            .ok_or_else(|| ScanError::config("--rootPath is required"))?;
        let report_dir = args
            .report_path
            .as_deref()
            .ok_or_else(|| ScanError::config("--reportPath is required"))?;

        validate_readable_directory(root)?;
        validate_writable_directory(report_dir)?;
        profile.validate()?;

        let workers = match args.workers.unwrap_or(profile.workers) {
            0 => num_cpus::get(),
            n => n,
        };

        let config = ScanConfiguration::new(
            root.to_path_buf(),
            report_dir.join(&profile.report_name),
            algorithm,
        )
        .with_verbose(args.verbose)
        .with_workers(workers)
        .with_summary_path(
            profile
                .write_summary
                .then(|| report_dir.join(&profile.summary_name)),
        )
        .with_log_path(Some(report_dir.join(&profile.log_name)));

        debug!("Resolved scan configuration: {:?}", config);
        Ok(config)
    }

    /// Files this tool writes; excluded from the walk when they sit inside the root
    pub fn output_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.report_path.clone()];
        paths.extend(self.summary_path.iter().cloned());
        paths.extend(self.log_path.iter().cloned());
        paths
    }
}
