//! Sequential reader over the document log
//!
//! Every record is checksum-verified as it is read. Any framing or checksum
//! failure is reported as corruption with the byte offset of the record.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::record::{LogRecord, MIN_RECORD_SIZE};

/// Forward-only reader over `documents.dat`
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log file for reading.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io(format!("Failed to open document log: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read document log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Returns the byte offset of the next record.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a record was read
    /// - `Ok(None)` at end of file
    /// - `Err(StoreError::Corruption)` on truncation or checksum failure
    pub fn read_next(&mut self) -> StoreResult<Option<LogRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Invalid record length {} ({} bytes remaining)",
                    record_length, remaining
                ),
            ));
        }

        let mut buf = vec![0u8; record_length as usize];
        buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut buf[4..]).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = LogRecord::deserialize(&buf)
            .map_err(|e| StoreError::corruption(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::super::writer::LogWriter;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_empty_log() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::open(dir.path()).unwrap();

        let mut reader = LogReader::open(writer.path()).unwrap();
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_read_records_in_order() {
        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path()).unwrap();
        writer
            .append(&LogRecord::document("lightsabers", "a", b"{}".to_vec()))
            .unwrap();
        writer
            .append(&LogRecord::tombstone("lightsabers", "a"))
            .unwrap();

        let mut reader = LogReader::open(writer.path()).unwrap();
        let mut records = Vec::new();
        while let Some(record) = reader.read_next().unwrap() {
            records.push(record);
        }
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_tombstone);
        assert!(records[1].is_tombstone);
        assert_eq!(reader.current_offset(), writer.current_offset());
    }

    #[test]
    fn test_trailing_garbage_is_corruption() {
        use std::io::Write;

        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path()).unwrap();
        let first = writer
            .append(&LogRecord::document("lightsabers", "a", b"{}".to_vec()))
            .unwrap();
        assert_eq!(first, 0);
        let path = writer.path().to_path_buf();
        drop(writer);

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(&[0xAB; 7]).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_some());
        let err = reader.read_next().unwrap_err();
        assert!(err.is_fatal());
    }
}
