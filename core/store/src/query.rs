//! FILENAME: core/store/src/query.rs
//! Ad-hoc Query Export - Runs one read-only SQL statement and exports the result.

use std::fmt;
use std::path::Path;

use rusqlite::types::Value;

use crate::error::StoreError;

/// Rows shown by `QueryResult::preview` when no count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// A single cell of a query result, keeping the SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => QueryValue::Null,
            Value::Integer(i) => QueryValue::Integer(i),
            Value::Real(f) => QueryValue::Real(f),
            Value::Text(s) => QueryValue::Text(s),
            Value::Blob(b) => QueryValue::Blob(b),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Null => Ok(()),
            QueryValue::Integer(i) => write!(f, "{}", i),
            QueryValue::Real(r) => write!(f, "{}", r),
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<QueryValue>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header line plus one line per row.
    pub fn write_csv(&self, path: &Path) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The first `limit` rows as an aligned text table, with an index column.
    pub fn preview(&self, limit: usize) -> String {
        let shown: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(limit)
            .enumerate()
            .map(|(idx, row)| {
                std::iter::once(idx.to_string())
                    .chain(row.iter().map(QueryValue::to_string))
                    .collect()
            })
            .collect();

        let header: Vec<String> = std::iter::once(String::new())
            .chain(self.columns.iter().cloned())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &shown {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![render(&header)];
        lines.extend(shown.iter().map(|row| render(row)));
        if self.rows.len() > limit {
            lines.push(format!("[{} rows x {} columns]", self.rows.len(), self.columns.len()));
        }
        lines.join("\n")
    }
}

/// Executes `sql` against the database opened read-only.
/// The connection is released whether or not the statement succeeds.
pub fn run_query(db_path: &Path, sql: &str) -> Result<QueryResult, StoreError> {
    let conn = crate::open_read_only(db_path)?;
    let mut stmt = conn.prepare(sql.trim())?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut result_rows = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(QueryValue::from(row.get::<_, Value>(idx)?));
        }
        result_rows.push(values);
    }

    log::debug!("query returned {} rows x {} columns", result_rows.len(), width);
    Ok(QueryResult {
        columns,
        rows: result_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::apply_schema;
    use rusqlite::Connection;
    use tempfile::tempdir;

    fn seeded_db(dir: &Path) -> std::path::PathBuf {
        let db_path = dir.join("ecom.db");
        let conn = Connection::open(&db_path).unwrap();
        apply_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO products VALUES (1, 'Cedar Lamp', 'home', 19.5, 'SKU00001');
             INSERT INTO products VALUES (2, 'Quiet Novel', 'books', 7.25, 'SKU00002');
             INSERT INTO products VALUES (3, 'Brisk Robot', 'toys', NULL, 'SKU00003');",
        )
        .unwrap();
        db_path
    }

    #[test]
    fn test_run_query_keeps_storage_classes() {
        let dir = tempdir().unwrap();
        let db_path = seeded_db(dir.path());

        let result = run_query(&db_path, "SELECT product_id, name, price FROM products ORDER BY product_id;\n").unwrap();

        assert_eq!(result.columns, vec!["product_id", "name", "price"]);
        assert_eq!(result.row_count(), 3);
        assert_eq!(result.rows[0][0], QueryValue::Integer(1));
        assert_eq!(result.rows[0][1], QueryValue::Text("Cedar Lamp".to_string()));
        assert_eq!(result.rows[1][2], QueryValue::Real(7.25));
        assert_eq!(result.rows[2][2], QueryValue::Null);
    }

    #[test]
    fn test_malformed_query_is_an_error() {
        let dir = tempdir().unwrap();
        let db_path = seeded_db(dir.path());

        assert!(matches!(
            run_query(&db_path, "SELEC nothing FROM"),
            Err(StoreError::Sqlite(_))
        ));
    }

    #[test]
    fn test_read_only_connection_rejects_writes() {
        let dir = tempdir().unwrap();
        let db_path = seeded_db(dir.path());

        assert!(run_query(&db_path, "DELETE FROM products").is_err());
        let count = run_query(&db_path, "SELECT COUNT(*) AS n FROM products").unwrap();
        assert_eq!(count.rows[0][0], QueryValue::Integer(3));
    }

    #[test]
    fn test_write_csv_and_preview() {
        let dir = tempdir().unwrap();
        let db_path = seeded_db(dir.path());
        let result = run_query(&db_path, "SELECT name, category FROM products ORDER BY product_id").unwrap();

        let csv_path = dir.path().join("out.csv");
        result.write_csv(&csv_path).unwrap();
        let written = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(
            written,
            "name,category\nCedar Lamp,home\nQuiet Novel,books\nBrisk Robot,toys\n"
        );

        let preview = result.preview(2);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("category"));
        assert!(lines[1].starts_with("0"));
        assert_eq!(lines[3], "[3 rows x 2 columns]");
    }
}
