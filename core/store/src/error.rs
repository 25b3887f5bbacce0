//! FILENAME: core/store/src/error.rs

use std::path::PathBuf;

use dataset::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data folder not found: {}. Run `generate` first.", .0.display())]
    MissingDataDir(PathBuf),

    #[error("database not found: {}. Run `ingest` first.", .0.display())]
    MissingDatabase(PathBuf),
}
