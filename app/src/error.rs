//! FILENAME: app/src/error.rs

use dataset::DatasetError;
use pipeline_engine::ConfigError;
use store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Invalid filter: {0}")]
    Filter(#[from] ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Chart error: {0}")]
    Chart(String),
}
