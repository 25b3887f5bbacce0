//! FILENAME: app/src/commands/verify.rs
//! PURPOSE: Reports whether the database matches its source files.

use std::io::Write;

use store::verify_store;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::render::console::format_table;

/// Fails with a configuration error when the store is inconsistent, so the
/// process exits non-zero.
pub fn execute(config: &AppConfig, out: &mut dyn Write) -> Result<(), AppError> {
    let report = verify_store(&config.db_path, &config.data_dir)?;

    let rows: Vec<Vec<String>> = report
        .tables
        .iter()
        .map(|t| {
            vec![
                t.kind.table_name().to_string(),
                t.file_rows.to_string(),
                t.table_rows.to_string(),
                if t.matches() { "ok" } else { "MISMATCH" }.to_string(),
            ]
        })
        .collect();
    writeln!(out, "{}", format_table(&["table", "file rows", "table rows", "status"], &rows))?;

    if report.foreign_key_violations.is_empty() {
        writeln!(out, "Foreign keys: ok")?;
    } else {
        writeln!(out, "Foreign key violations: {}", report.foreign_key_violations.len())?;
        for violation in &report.foreign_key_violations {
            writeln!(out, "  {}", violation)?;
        }
    }

    if report.is_consistent() {
        writeln!(out, "Store is consistent.")?;
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} does not match {}",
            config.db_path.display(),
            config.data_dir.display()
        )))
    }
}
