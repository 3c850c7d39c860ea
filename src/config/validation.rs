//! Directory checks applied to command-line paths before a scan starts.

use std::path::Path;

use crate::constants::{ERROR_DIRECTORY_MISSING, ERROR_DIRECTORY_UNREADABLE, ERROR_DIRECTORY_UNWRITABLE};
use crate::error::ScanError;

/// The scan root must be an existing, readable directory.
pub fn validate_readable_directory(path: &Path) -> Result<(), ScanError> {
    check_directory(path, AccessMode::Read, has_access)
}

/// The report directory must be an existing, writable directory.
pub fn validate_writable_directory(path: &Path) -> Result<(), ScanError> {
    check_directory(path, AccessMode::Write, has_access)
}

fn check_directory<F>(path: &Path, mode: AccessMode, probe: F) -> Result<(), ScanError>
where
    F: Fn(&Path, AccessMode) -> bool,
{
    if !path.is_dir() {
        return Err(ScanError::config(format!(
            "{} ({})",
            ERROR_DIRECTORY_MISSING,
            path.display()
        )));
    }
    if !probe(path, mode) {
        let message = match mode {
            AccessMode::Read => ERROR_DIRECTORY_UNREADABLE,
            AccessMode::Write => ERROR_DIRECTORY_UNWRITABLE,
        };
        return Err(ScanError::config(format!("{} ({})", message, path.display())));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessMode {
    Read,
    Write,
}

#[cfg(unix)]
fn has_access(path: &Path, mode: AccessMode) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let flag = match mode {
        AccessMode::Read => libc::R_OK | libc::X_OK,
        AccessMode::Write => libc::W_OK | libc::X_OK,
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call
    unsafe { libc::access(c_path.as_ptr(), flag) == 0 }
}

#[cfg(not(unix))]
fn has_access(path: &Path, mode: AccessMode) -> bool {
    match mode {
        AccessMode::Read => std::fs::read_dir(path).is_ok(),
        AccessMode::Write => path
            .metadata()
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false),
    }
}
