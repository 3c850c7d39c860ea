use std::fs;
use std::path::Path;

use log::debug;

/// Pre-open type of a candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Nothing resolvable at the path (dangling links included)
    Missing,
    SymbolicLink,
    Regular,
    /// Directory, device, fifo, socket
    Other,
}

/// Classify a path without opening it.
///
/// Existence is judged through links, so a dangling link is `Missing`; a
/// link that resolves is always `SymbolicLink`. Links to directories never
/// reach here during a scan; the walk drops them.
pub fn classify(path: &Path) -> Classification {
    let link_meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!("Cannot stat {}: {}", path.display(), e);
            return Classification::Missing;
        }
    };

    let file_type = link_meta.file_type();
    if file_type.is_symlink() {
        return match fs::metadata(path) {
            Ok(_) => Classification::SymbolicLink,
            Err(_) => Classification::Missing,
        };
    }

    if file_type.is_file() {
        Classification::Regular
    } else {
        Classification::Other
    }
}
