//! FILENAME: core/store/src/lib.rs
//! Relational store for the e-commerce dataset.
//!
//! Loads the generated CSV files into SQLite, reads the five tables back as a
//! snapshot, verifies what was loaded, and runs ad-hoc read-only queries.
//! Every operation opens its own connection and drops it before returning.

mod error;
mod loader;
pub mod query;
pub mod schema;
mod snapshot;
mod verify;

pub use error::StoreError;
pub use loader::{ingest_directory, IngestOptions, IngestReport};
pub use query::{run_query, QueryResult, QueryValue, DEFAULT_PREVIEW_ROWS};
pub use snapshot::load_snapshot;
pub use verify::{verify_store, ForeignKeyViolation, TableCount, VerifyReport};

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

/// Opens an existing database without write access.
pub(crate) fn open_read_only(db_path: &Path) -> Result<Connection, StoreError> {
    if !db_path.is_file() {
        return Err(StoreError::MissingDatabase(db_path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}
