//! Per-file pipeline: classify, open, read, hash, stat.
//!
//! Each candidate ends in exactly one terminal state. Success yields a
//! [`FileRecord`]; every other state yields a [`FileError`] and no record.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::error::FileError;
use crate::models::FileRecord;
use crate::scanner::classifier::{classify, Classification};
use crate::utils::hash::HashAlgorithm;
use crate::utils::metadata::FileMetadata;

/// Run one candidate path through the pipeline.
pub fn process_file(path: &Path, algorithm: HashAlgorithm) -> Result<FileRecord, FileError> {
    process_with_opener(path, algorithm, |p| File::open(p))
}

fn process_with_opener<F>(
    path: &Path,
    algorithm: HashAlgorithm,
    open: F,
) -> Result<FileRecord, FileError>
where
    F: FnOnce(&Path) -> io::Result<File>,
{
    let rejected = match classify(path) {
        Classification::Regular => None,
        Classification::Missing => Some(FileError::Missing { path: path.to_path_buf() }),
        Classification::SymbolicLink => Some(FileError::LinkSkipped { path: path.to_path_buf() }),
        Classification::Other => Some(FileError::NotRegular { path: path.to_path_buf() }),
    };
    if let Some(err) = rejected {
        return Err(err);
    }

    let file = open(path).map_err(|source| FileError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;

    hash_open_file(path, file, algorithm)
}

/// Read an opened file to the end, hash it once, and stat the same handle.
/// The handle is closed when this returns, on every path.
pub fn hash_open_file(
    path: &Path,
    mut file: File,
    algorithm: HashAlgorithm,
) -> Result<FileRecord, FileError> {
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|source| FileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let digest = algorithm.digest_hex(&data);

    let metadata = FileMetadata::from_handle(&file).map_err(|source| FileError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Hashed {} ({} bytes): {}", path.display(), data.len(), digest);

    Ok(FileRecord {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
        path: path.to_path_buf(),
        digest,
        metadata,
    })
}
