//! CSV report sink.
//!
//! Every field is quoted, embedded quotes are doubled and rows end in CRLF.
//! Rows are flushed as they are written so an interrupted scan leaves a
//! valid prefix on disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{REPORT_LEADING_COLUMNS, REPORT_TRAILING_COLUMNS};
use crate::models::FileRecord;
use crate::utils::metadata::format_ctime;

/// Append-only destination for report rows.
pub trait RecordSink {
    fn write_record(&mut self, record: &FileRecord) -> io::Result<()>;
}

/// Collects records in memory
impl RecordSink for Vec<FileRecord> {
    fn write_record(&mut self, record: &FileRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Quote-all CSV report bound to one output file.
pub struct ReportWriter<W: Write = BufWriter<File>> {
    writer: W,
    path: PathBuf,
    rows: usize,
}

impl ReportWriter {
    /// Create (truncating) the report file and write the header row
    pub fn create(path: &Path, algorithm_label: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        debug!("Opened report {}", path.display());
        ReportWriter::from_writer(BufWriter::new(file), path, algorithm_label)
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn from_writer(writer: W, path: &Path, algorithm_label: &str) -> io::Result<Self> {
        let mut report = ReportWriter {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        };
        let header: Vec<&str> = REPORT_LEADING_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(algorithm_label))
            .chain(REPORT_TRAILING_COLUMNS.iter().copied())
            .collect();
        report.write_row(&header)?;
        Ok(report)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<()> {
        let line = fields
            .iter()
            .map(|f| quote_field(f.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()
    }

    /// Flush and release the underlying writer
    pub fn close(mut self) -> io::Result<W> {
        self.writer.flush()?;
        debug!("Closed report {} after {} rows", self.path.display(), self.rows);
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for ReportWriter<W> {
    fn write_record(&mut self, record: &FileRecord) -> io::Result<()> {
        self.write_row(&record_fields(record))?;
        self.rows += 1;
        Ok(())
    }
}

/// Report columns for one record, in header order
pub fn record_fields(record: &FileRecord) -> [String; 10] {
    let meta = &record.metadata;
    [
        record.file_name.clone(),
        record.path.to_string_lossy().to_string(),
        meta.size.to_string(),
        format_ctime(meta.modified),
        format_ctime(meta.accessed),
        format_ctime(meta.created),
        record.digest.clone(),
        meta.owner_id.to_string(),
        meta.group_id.to_string(),
        meta.mode_bits(),
    ]
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
