//! Verbose-only progress output.
//!
//! Progress messages are non-essential: they never change the report. The
//! orchestrator receives a reporter instead of consulting a global flag, so
//! tests can run scans silently or capture the messages.

use std::sync::Mutex;

/// Sink for human-facing progress messages.
pub trait ProgressReporter: Send + Sync {
    fn message(&self, msg: &str);
}

/// Prints to stdout when verbose, otherwise stays quiet.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        ConsoleReporter { verbose }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn message(&self, msg: &str) {
        if self.verbose {
            println!("{}", msg);
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn message(&self, _msg: &str) {}
}

/// Keeps messages in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressReporter for RecordingReporter {
    fn message(&self, msg: &str) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(msg.to_string()),
            Err(poisoned) => poisoned.into_inner().push(msg.to_string()),
        }
    }
}
