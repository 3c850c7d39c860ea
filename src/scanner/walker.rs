use std::any::Any;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crossbeam::channel;
use log::{debug, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::validation::validate_readable_directory;
use crate::config::ScanConfiguration;
use crate::constants::{OUTCOME_QUEUE_PER_WORKER, PROGRESS_LOG_INTERVAL};
use crate::error::{FileError, ScanError};
use crate::models::{FileRecord, ScanResult};
use crate::progress::ProgressReporter;
use crate::scanner::pipeline::process_file;
use crate::utils::hash::HashAlgorithm;
use crate::utils::report::{RecordSink, ReportWriter};

/// One entry produced by the directory enumeration.
#[derive(Debug)]
enum Candidate {
    Path(PathBuf),
    Unreadable { path: PathBuf, message: String },
}

impl Candidate {
    fn process(self, algorithm: HashAlgorithm) -> Result<FileRecord, FileError> {
        match self {
            Candidate::Path(path) => process_file(&path, algorithm),
            Candidate::Unreadable { path, message } => Err(FileError::Unreadable { path, message }),
        }
    }
}

/// Tool outputs that must not be hashed while they are being written.
#[derive(Debug, Clone, Default)]
struct Exclusions {
    names: HashSet<OsString>,
    paths: Vec<PathBuf>,
}

impl Exclusions {
    fn new(outputs: &[PathBuf]) -> Self {
        let mut exclusions = Exclusions::default();
        for output in outputs {
            if let (Some(name), Some(resolved)) = (output.file_name(), resolve_parent(output)) {
                exclusions.names.insert(name.to_os_string());
                exclusions.paths.push(resolved);
            }
        }
        exclusions
    }

    fn contains(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) if self.names.contains(name) => resolve_parent(path)
                .map(|resolved| self.paths.contains(&resolved))
                .unwrap_or(false),
            _ => false,
        }
    }
}

// Canonical parent joined with the file name, without resolving the file itself
fn resolve_parent(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Drives one scan: enumerate, classify, hash, report, count.
pub struct Scanner<'a> {
    config: &'a ScanConfiguration,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ScanConfiguration, reporter: &'a dyn ProgressReporter) -> Self {
        Scanner { config, reporter }
    }

    /// Scan into the CSV report named by the configuration.
    ///
    /// The root is checked before the report is created, so a bad root
    /// leaves no report behind. The report is closed exactly once, whether
    /// the walk completes or aborts.
    pub fn run(&self) -> Result<ScanResult, ScanError> {
        validate_readable_directory(&self.config.root)?;

        let report_path = &self.config.report_path;
        let mut report = ReportWriter::create(report_path, self.config.algorithm.label())
            .map_err(|e| ScanError::report(report_path, e))?;
        info!("Writing {} report to {}", self.config.algorithm, report.path().display());

        let outcome = self.scan_into(&mut report);
        let closed = report.close();

        match (outcome, closed) {
            (Ok(result), Ok(_)) => Ok(result),
            (Ok(_), Err(e)) => Err(ScanError::report(report_path, e)),
            (Err(e), close_result) => {
                if let Err(close_err) = close_result {
                    warn!("Failed to close report {}: {}", report_path.display(), close_err);
                }
                Err(e)
            }
        }
    }

    /// Scan into any record sink. Per-file failures are logged and counted;
    /// only a sink failure ends the walk early.
    pub fn scan_into<S: RecordSink>(&self, sink: &mut S) -> Result<ScanResult, ScanError> {
        let start_time = Instant::now();
        info!("Root Path: {}", self.config.root.display());
        self.reporter.message(&format!("Scanning: {}", self.config.root.display()));

        let mut result = ScanResult::new();
        if self.config.workers > 1 {
            info!("Hashing with {} workers", self.config.workers);
            self.scan_parallel(sink, &mut result)?;
        } else {
            self.scan_sequential(sink, &mut result)?;
        }

        result.elapsed = start_time.elapsed();
        info!(
            "Files Processed: {} Errors: {} Elapsed Time: {:.3} seconds",
            result.files_processed,
            result.files_failed,
            result.elapsed.as_secs_f64()
        );
        Ok(result)
    }

    fn scan_sequential<S: RecordSink>(
        &self,
        sink: &mut S,
        result: &mut ScanResult,
    ) -> Result<(), ScanError> {
        let algorithm = self.config.algorithm;
        for candidate in self.candidates() {
            let outcome = candidate.process(algorithm);
            self.record_outcome(outcome, sink, result)?;
        }
        Ok(())
    }

    /// Fan candidates out to a bounded rayon pool; this thread stays the
    /// only writer and receives finished outcomes over a channel.
    fn scan_parallel<S: RecordSink>(
        &self,
        sink: &mut S,
        result: &mut ScanResult,
    ) -> Result<(), ScanError> {
        let workers = self.config.workers;
        let algorithm = self.config.algorithm;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ScanError::WorkerPool { message: e.to_string() })?;

        let (tx, rx) = channel::bounded(workers * OUTCOME_QUEUE_PER_WORKER);
        let candidates = self.candidates();

        std::thread::scope(|scope| {
            let producer = scope.spawn(move || {
                pool.install(|| {
                    candidates
                        .par_bridge()
                        .try_for_each_with(tx, |tx, candidate| {
                            // A closed channel means the writer gave up
                            tx.send(candidate.process(algorithm)).map_err(|_| ())
                        })
                })
            });

            let mut written = Ok(());
            for outcome in rx.iter() {
                if let Err(e) = self.record_outcome(outcome, sink, result) {
                    written = Err(e);
                    break;
                }
            }
            drop(rx);

            let joined = worker_outcome(producer.join());
            written.and(joined)
        })
    }

    fn record_outcome<S: RecordSink>(
        &self,
        outcome: Result<FileRecord, FileError>,
        sink: &mut S,
        result: &mut ScanResult,
    ) -> Result<(), ScanError> {
        match outcome {
            Ok(record) => {
                self.reporter
                    .message(&format!("Processing File: {}", record.path.display()));
                sink.write_record(&record)
                    .map_err(|e| ScanError::report(&self.config.report_path, e))?;
                result.record_success(record.metadata.size);
            }
            Err(err) => {
                warn!("{}", err);
                result.record_failure(err.kind());
            }
        }

        let seen = result.candidates();
        if seen % PROGRESS_LOG_INTERVAL == 0 {
            info!("Classified {} files", seen);
        }
        Ok(())
    }

    /// Lazily enumerate every non-directory entry under the root. Links are
    /// never followed; links to directories are dropped like directories.
    fn candidates(&self) -> impl Iterator<Item = Candidate> + Send + 'static {
        let root = self.config.root.clone();
        let exclusions = Exclusions::new(&self.config.output_paths());

        WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        return None;
                    }
                    if entry.path_is_symlink() && points_to_directory(entry.path()) {
                        debug!("Skipping link to directory {}", entry.path().display());
                        return None;
                    }
                    if exclusions.contains(entry.path()) {
                        debug!("Skipping tool output {}", entry.path().display());
                        return None;
                    }
                    Some(Candidate::Path(entry.into_path()))
                }
                Err(err) => Some(Candidate::Unreadable {
                    path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                    message: err.to_string(),
                }),
            })
    }
}

fn points_to_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

// A panicked worker leaves candidates uncounted
fn worker_outcome<T>(joined: Result<T, Box<dyn Any + Send>>) -> Result<(), ScanError> {
    match joined {
        Ok(_) => Ok(()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!("Hashing worker pool panicked: {}", message);
            Err(ScanError::WorkerPool {
                message: format!("worker panicked: {}", message),
            })
        }
    }
}

/// Run a complete scan with the CSV report named by `config`.
pub fn run(
    config: &ScanConfiguration,
    reporter: &dyn ProgressReporter,
) -> Result<ScanResult, ScanError> {
    Scanner::new(config, reporter).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::progress::{RecordingReporter, SilentReporter};
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path, report_dir: &Path) -> ScanConfiguration {
        ScanConfiguration::new(
            root.to_path_buf(),
            report_dir.join("report.csv"),
            HashAlgorithm::Md5,
        )
    }

    #[test]
    fn test_scan_into_collects_records() {
        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        fs::write(root.path().join("one.txt"), b"1").unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        fs::write(root.path().join("sub/two.txt"), b"22").unwrap();

        let config = config_for(root.path(), reports.path());
        let mut records: Vec<FileRecord> = Vec::new();
        let result = Scanner::new(&config, &SilentReporter)
            .scan_into(&mut records)
            .unwrap();

        assert_eq!(result.files_processed, 2);
        assert_eq!(result.files_failed, 0);
        assert_eq!(result.bytes_hashed, 3);
        assert_eq!(records.len(), 2);
        // Directories are descended, never classified
        assert!(records.iter().all(|r| r.file_name != "sub"));
    }

    #[test]
    fn test_exclusions_skip_report_inside_root() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("evidence.bin"), b"abc").unwrap();

        let config = config_for(root.path(), root.path());
        let result = run(&config, &SilentReporter).unwrap();

        assert_eq!(result.files_processed, 1);
        assert_eq!(result.files_failed, 0);
        let report = fs::read_to_string(root.path().join("report.csv")).unwrap();
        assert!(report.contains("evidence.bin"));
        assert!(!report.contains("\"report.csv\""));
    }

    #[test]
    fn test_exclusions_match_by_location_not_name() {
        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        // Same name as the report, different directory
        fs::write(root.path().join("report.csv"), b"someone else's csv").unwrap();

        let config = config_for(root.path(), reports.path());
        let mut records: Vec<FileRecord> = Vec::new();
        let result = Scanner::new(&config, &SilentReporter)
            .scan_into(&mut records)
            .unwrap();
        assert_eq!(result.files_processed, 1);
        assert_eq!(records[0].file_name, "report.csv");
    }

    #[test]
    fn test_verbose_messages_go_to_reporter() {
        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        fs::write(root.path().join("a.txt"), b"").unwrap();

        let config = config_for(root.path(), reports.path());
        let reporter = RecordingReporter::new();
        let mut records: Vec<FileRecord> = Vec::new();
        Scanner::new(&config, &reporter).scan_into(&mut records).unwrap();

        let messages = reporter.messages();
        assert!(messages.iter().any(|m| m.starts_with("Processing File:") && m.ends_with("a.txt")));
    }

    #[test]
    fn test_missing_root_aborts_before_report() {
        let reports = TempDir::new().unwrap();
        let config = config_for(Path::new("/no/such/root/dir"), reports.path());

        let err = run(&config, &SilentReporter).unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { .. }));
        assert!(!reports.path().join("report.csv").exists());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        for i in 0..40 {
            let sub = root.path().join(format!("d{}", i % 5));
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(format!("f{}.bin", i)), vec![i as u8; i * 10]).unwrap();
        }

        let sequential = config_for(root.path(), reports.path());
        let parallel = sequential.clone().with_workers(4);

        let mut seq_records: Vec<FileRecord> = Vec::new();
        let seq = Scanner::new(&sequential, &SilentReporter)
            .scan_into(&mut seq_records)
            .unwrap();
        let mut par_records: Vec<FileRecord> = Vec::new();
        let par = Scanner::new(&parallel, &SilentReporter)
            .scan_into(&mut par_records)
            .unwrap();

        assert_eq!(seq.files_processed, 40);
        assert_eq!(par.files_processed, seq.files_processed);
        assert_eq!(par.files_failed, seq.files_failed);

        let key = |r: &FileRecord| (r.path.clone(), r.digest.clone());
        let mut a: Vec<_> = seq_records.iter().map(key).collect();
        let mut b: Vec<_> = par_records.iter().map(key).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    struct FailingSink {
        accepted: usize,
        limit: usize,
    }

    impl RecordSink for FailingSink {
        fn write_record(&mut self, _record: &FileRecord) -> std::io::Result<()> {
            if self.accepted == self.limit {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_aborts_walk() {
        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        for i in 0..10 {
            fs::write(root.path().join(format!("f{}", i)), b"x").unwrap();
        }

        for workers in [1, 3] {
            let config = config_for(root.path(), reports.path()).with_workers(workers);
            let mut sink = FailingSink { accepted: 0, limit: 2 };
            let err = Scanner::new(&config, &SilentReporter)
                .scan_into(&mut sink)
                .unwrap_err();
            assert!(matches!(err, ScanError::ReportFailed { .. }));
            assert_eq!(sink.accepted, 2);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_links_are_not_candidates() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        fs::write(root.path().join("sub/f"), b"data").unwrap();
        symlink(root.path().join("sub"), root.path().join("sublink")).unwrap();
        symlink(root.path().join("sub/f"), root.path().join("filelink")).unwrap();

        let config = config_for(root.path(), reports.path());
        let mut records: Vec<FileRecord> = Vec::new();
        let result = Scanner::new(&config, &SilentReporter)
            .scan_into(&mut records)
            .unwrap();

        assert_eq!(result.files_processed, 1);
        assert_eq!(result.files_failed, 1);
        assert_eq!(result.failures_of(FailureKind::LinkSkipped), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_counted_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        // Root can list any directory
        if unsafe { libc::geteuid() } == 0 {
            return;
        }

        let root = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        let locked = root.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), b"never read").unwrap();
        fs::write(root.path().join("ok.txt"), b"ok").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let config = config_for(root.path(), reports.path());
        let mut records: Vec<FileRecord> = Vec::new();
        let result = Scanner::new(&config, &SilentReporter).scan_into(&mut records);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let result = result.unwrap();
        assert_eq!(result.files_processed, 1);
        assert_eq!(result.files_failed, 1);
        assert_eq!(result.failures_of(FailureKind::Unreadable), 1);
        assert_eq!(records[0].file_name, "ok.txt");
    }

    #[test]
    fn test_unreadable_candidate_is_counted() {
        let candidate = Candidate::Unreadable {
            path: PathBuf::from("/evidence/locked"),
            message: "Permission denied".to_string(),
        };
        let err = candidate.process(HashAlgorithm::Md5).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unreadable);

        let root = TempDir::new().unwrap();
        let config = config_for(root.path(), root.path());
        let mut sink: Vec<FileRecord> = Vec::new();
        let mut result = ScanResult::new();
        Scanner::new(&config, &SilentReporter)
            .record_outcome(Err(err), &mut sink, &mut result)
            .unwrap();
        assert_eq!(result.failures_of(FailureKind::Unreadable), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_worker_panic_fails_scan() {
        let joined = std::panic::catch_unwind(|| panic!("hash worker died"));
        let err = worker_outcome::<()>(joined).unwrap_err();
        assert!(matches!(err, ScanError::WorkerPool { .. }));
        assert!(err.to_string().contains("hash worker died"));

        assert!(worker_outcome(Ok::<(), Box<dyn Any + Send>>(())).is_ok());
    }
}
