//! FILENAME: app/src/commands/ingest.rs
//! PURPOSE: Loads the CSV files into the SQLite database.

use std::io::Write;

use store::{ingest_directory, IngestOptions};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::log_info;

pub fn execute(config: &AppConfig, fresh: bool, out: &mut dyn Write) -> Result<(), AppError> {
    log_info!(
        "INGEST",
        "data_dir={} db={} fresh={}",
        config.data_dir.display(),
        config.db_path.display(),
        fresh
    );

    let report = ingest_directory(&config.data_dir, &config.db_path, IngestOptions { fresh })?;
    for (kind, rows) in &report.tables {
        writeln!(out, "Inserted {} rows into {}", rows, kind.table_name())?;
    }
    writeln!(out, "Ingestion complete. DB: {}", report.db_path.display())?;
    Ok(())
}
