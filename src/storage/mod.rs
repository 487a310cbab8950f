//! Document storage for lightsaber records
//!
//! The store is a generic document database: collections of JSON-object
//! documents keyed by id, with get / set / merge-update / delete and
//! exact-match query by top-level field.
//!
//! # Backends
//!
//! - `MemoryStore`: process-local, lost on exit
//! - `FileStore`: append-only log under `<data_dir>/data/documents.dat`
//!
//! # Log Properties
//!
//! - Append-only, no in-place updates
//! - CRC32 checksum on every record, verified on every read
//! - Latest record wins for the same (collection, id)
//! - Tombstones mark deletes
//! - A corrupt log refuses to open

mod document;
mod errors;
mod file;
mod memory;
mod query;
mod reader;
mod record;
mod writer;

pub use document::{Document, DocumentStore};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use query::{FieldFilter, FilterSet};
pub use reader::LogReader;
pub use record::{compute_checksum, LogRecord};
pub use writer::{log_path, LogWriter};
