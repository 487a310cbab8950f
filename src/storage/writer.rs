//! Append-only writer for the document log
//!
//! Records are never modified in place. Each append is followed by fsync and
//! is not acknowledged until both succeed. A failed append is truncated away
//! so the log always ends on a record boundary; if that truncation fails the
//! writer refuses every later append.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use super::errors::{StoreError, StoreResult};
use super::record::LogRecord;

/// Subdirectory of the data directory holding the log
const DATA_SUBDIR: &str = "data";

/// Log file name
const LOG_FILE: &str = "documents.dat";

/// Path of the document log under a data directory
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATA_SUBDIR).join(LOG_FILE)
}

/// Appends records to `<data_dir>/data/documents.dat`
pub struct LogWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
    /// Set when a torn tail could not be truncated
    failed: bool,
    /// Bytes written before an injected write failure
    #[cfg(test)]
    fail_after: Option<usize>,
}

impl LogWriter {
    /// Opens or creates the log, creating parent directories if needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = log_path(data_dir);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open document log: {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read document log metadata", e))?
            .len();

        Ok(Self {
            path,
            file,
            current_offset,
            failed: false,
            #[cfg(test)]
            fail_after: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset where the next record will land
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends a record and fsyncs. Returns the record's byte offset.
    ///
    /// On failure nothing of the record remains in the log.
    pub fn append(&mut self, record: &LogRecord) -> StoreResult<u64> {
        if self.failed {
            return Err(StoreError::unavailable(format!(
                "Document log {} has a torn tail and accepts no further writes",
                self.path.display()
            )));
        }

        let bytes = record.serialize();
        let offset = self.current_offset;

        if let Err((stage, e)) = self.write_synced(&bytes) {
            self.roll_back(offset);
            return Err(StoreError::io(
                format!("{} for document: {}", stage, record.document_id),
                e,
            ));
        }

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }

    fn write_synced(&mut self, bytes: &[u8]) -> Result<(), (&'static str, io::Error)> {
        self.write_bytes(bytes)
            .map_err(|e| ("Failed to append", e))?;
        self.file
            .sync_all()
            .map_err(|e| ("fsync failed after append", e))
    }

    #[cfg(not(test))]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)
    }

    #[cfg(test)]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.fail_after.take() {
            Some(n) => {
                self.file.write_all(&bytes[..n.min(bytes.len())])?;
                Err(io::Error::new(io::ErrorKind::Other, "injected write failure"))
            }
            None => self.file.write_all(bytes),
        }
    }

    /// Makes the next write stop after `n` bytes and fail.
    #[cfg(test)]
    pub(super) fn fail_next_write_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    /// Truncates the log back to `offset`, the end of the last good record.
    fn roll_back(&mut self, offset: u64) {
        let result = self
            .file
            .set_len(offset)
            .and_then(|_| self.file.sync_all());

        match result {
            Ok(()) => warn!(
                path = %self.path.display(),
                offset,
                "failed append rolled back"
            ),
            Err(e) => {
                self.failed = true;
                error!(
                    path = %self.path.display(),
                    offset,
                    error = %e,
                    "could not roll back failed append; log is closed for writes"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::reader::LogReader;
    use tempfile::TempDir;

    #[test]
    fn test_writer_creates_directories() {
        let dir = TempDir::new().unwrap();
        assert!(!dir.path().join("data").exists());

        let writer = LogWriter::open(dir.path()).unwrap();
        assert!(writer.path().exists());
        assert_eq!(writer.current_offset(), 0);
    }

    #[test]
    fn test_offsets_advance() {
        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path()).unwrap();

        let record = LogRecord::document("lightsabers", "a", b"{}".to_vec());
        let len = record.serialize().len() as u64;

        assert_eq!(writer.append(&record).unwrap(), 0);
        assert_eq!(writer.append(&record).unwrap(), len);
        assert_eq!(writer.current_offset(), 2 * len);
    }

    #[test]
    fn test_reopen_resumes_at_end() {
        let dir = TempDir::new().unwrap();
        let end = {
            let mut writer = LogWriter::open(dir.path()).unwrap();
            writer
                .append(&LogRecord::tombstone("lightsabers", "a"))
                .unwrap();
            writer.current_offset()
        };

        let writer = LogWriter::open(dir.path()).unwrap();
        assert_eq!(writer.current_offset(), end);
    }

    #[test]
    fn test_torn_append_is_rolled_back() {
        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path()).unwrap();

        let first = LogRecord::document("lightsabers", "a", b"{}".to_vec());
        let end = writer.append(&first).unwrap() + first.serialize().len() as u64;

        writer.fail_next_write_after(7);
        let torn = LogRecord::document("lightsabers", "b", b"{\"x\":1}".to_vec());
        assert!(matches!(writer.append(&torn), Err(StoreError::Io { .. })));
        assert_eq!(writer.current_offset(), end);
        assert_eq!(fs::metadata(writer.path()).unwrap().len(), end);

        let last = LogRecord::tombstone("lightsabers", "a");
        assert_eq!(writer.append(&last).unwrap(), end);

        let mut reader = LogReader::open(writer.path()).unwrap();
        let mut ids = Vec::new();
        while let Some(record) = reader.read_next().unwrap() {
            ids.push((record.document_id, record.is_tombstone));
        }
        assert_eq!(ids, vec![("a".to_string(), false), ("a".to_string(), true)]);
    }

    #[test]
    fn test_unrecoverable_tail_closes_writer() {
        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path()).unwrap();
        writer
            .append(&LogRecord::tombstone("lightsabers", "a"))
            .unwrap();

        // Neither write nor truncate succeeds on a read-only handle
        writer.file = File::open(writer.path()).unwrap();
        let record = LogRecord::tombstone("lightsabers", "b");
        assert!(matches!(writer.append(&record), Err(StoreError::Io { .. })));

        writer.file = OpenOptions::new()
            .append(true)
            .open(writer.path())
            .unwrap();
        assert!(matches!(
            writer.append(&record),
            Err(StoreError::Unavailable(_))
        ));
    }
}
