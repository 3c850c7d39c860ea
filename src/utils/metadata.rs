use std::fs::{self, File};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};
use serde::{Serialize, Deserialize};

use crate::constants::CTIME_FORMAT;

/// Filesystem metadata captured for one report row.
///
/// Timestamps are whole seconds relative to the Unix epoch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub owner_id: u32,
    pub group_id: u32,
    pub mode: u32,
    pub accessed: i64,
    pub modified: i64,
    pub created: i64,
}

impl FileMetadata {
    /// Stat an already open handle, so the metadata describes exactly the
    /// entry whose bytes were read.
    pub fn from_handle(file: &File) -> std::io::Result<Self> {
        Ok(Self::from_metadata(&file.metadata()?))
    }

    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        let (owner_id, group_id) = get_owner_ids(metadata);
        FileMetadata {
            size: metadata.len(),
            owner_id,
            group_id,
            mode: get_mode_word(metadata),
            accessed: system_time_secs(metadata.accessed().ok()),
            modified: system_time_secs(metadata.modified().ok()),
            created: get_change_time(metadata),
        }
    }

    /// Mode word as a binary literal, e.g. `0b1000000110100100`
    pub fn mode_bits(&self) -> String {
        format!("{:#b}", self.mode)
    }
}

fn system_time_secs(time: Option<SystemTime>) -> i64 {
    match time {
        Some(t) => match t.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        },
        None => 0,
    }
}

/// Render epoch seconds the way C `ctime()` does, in local time
pub fn format_ctime(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format(CTIME_FORMAT).to_string(),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.format(CTIME_FORMAT).to_string(),
        chrono::LocalResult::None => secs.to_string(),
    }
}

// Platform-specific implementations for ownership, mode and change time
#[cfg(unix)]
fn get_owner_ids(metadata: &fs::Metadata) -> (u32, u32) {
    use std::os::unix::fs::MetadataExt;
    (metadata.uid(), metadata.gid())
}

#[cfg(not(unix))]
fn get_owner_ids(_metadata: &fs::Metadata) -> (u32, u32) {
    (0, 0)
}

#[cfg(unix)]
fn get_mode_word(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn get_mode_word(metadata: &fs::Metadata) -> u32 {
    // Synthesize S_IFDIR/S_IFREG plus permission bits from the read-only flag
    let file_type = if metadata.is_dir() { 0o040000 } else { 0o100000 };
    let perms = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    file_type | perms
}

// On Unix the third timestamp is st_ctime (inode change), not birth time
#[cfg(unix)]
fn get_change_time(metadata: &fs::Metadata) -> i64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ctime()
}

#[cfg(not(unix))]
fn get_change_time(metadata: &fs::Metadata) -> i64 {
    system_time_secs(metadata.created().ok())
}
