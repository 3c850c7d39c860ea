use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::constants::{DEFAULT_LOG_NAME, DEFAULT_REPORT_NAME, DEFAULT_SUMMARY_NAME, DEFAULT_WORKERS};
use crate::error::ScanError;

/// Optional YAML scan defaults. Command-line flags take precedence.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanProfile {
    /// Hashing workers; 0 uses every available core
    pub workers: usize,
    pub report_name: String,
    pub log_name: String,
    pub write_summary: bool,
    pub summary_name: String,
}

impl Default for ScanProfile {
    fn default() -> Self {
        ScanProfile {
            workers: DEFAULT_WORKERS,
            report_name: DEFAULT_REPORT_NAME.to_string(),
            log_name: DEFAULT_LOG_NAME.to_string(),
            write_summary: true,
            summary_name: DEFAULT_SUMMARY_NAME.to_string(),
        }
    }
}

impl ScanProfile {
    /// Load a profile from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read scan profile: {}", path.display()))?;

        let profile: ScanProfile = serde_yaml::from_str(&content)
            .context("Failed to parse YAML scan profile")?;

        debug!("Loaded scan profile from {}", path.display());
        Ok(profile)
    }

    /// Save the profile to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize scan profile to YAML")?;

        fs::write(path, yaml)
            .context(format!("Failed to write scan profile to {}", path.display()))?;

        info!("Saved scan profile to {}", path.display());
        Ok(())
    }

    /// Output names must be plain file names inside the report directory
    pub fn validate(&self) -> Result<(), ScanError> {
        for (field, name) in [
            ("report_name", &self.report_name),
            ("log_name", &self.log_name),
            ("summary_name", &self.summary_name),
        ] {
            if !is_plain_file_name(name) {
                return Err(ScanError::config(format!(
                    "{} must be a plain file name, got {:?}",
                    field, name
                )));
            }
        }

        if self.report_name == self.log_name
            || (self.write_summary
                && (self.summary_name == self.report_name || self.summary_name == self.log_name))
        {
            return Err(ScanError::config("report, log and summary names must differ"));
        }

        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

/// Load the profile at `path`, or the defaults when no path is given
pub fn load_or_default_profile(path: Option<&Path>) -> Result<ScanProfile> {
    match path {
        Some(p) => ScanProfile::from_yaml_file(p),
        None => Ok(ScanProfile::default()),
    }
}
