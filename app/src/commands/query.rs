//! FILENAME: app/src/commands/query.rs
//! PURPOSE: Runs an SQL file against the database and exports the result as CSV.

use std::fs;
use std::io::Write;
use std::path::Path;

use store::run_query;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::{log_error, log_info};

pub fn execute(
    config: &AppConfig,
    sql_path: &Path,
    out_path: &Path,
    preview_rows: usize,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let sql = fs::read_to_string(sql_path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", sql_path.display(), e)))?;

    let result = match run_query(&config.db_path, &sql) {
        Ok(result) => result,
        Err(e) => {
            log_error!("QUERY", "Error executing SQL: {}", e);
            return Err(e.into());
        }
    };

    result.write_csv(out_path)?;
    log_info!("QUERY", "{} rows exported to {}", result.row_count(), out_path.display());

    writeln!(out, "Query exported to {}", out_path.display())?;
    writeln!(out, "{}", result.preview(preview_rows))?;
    Ok(())
}
