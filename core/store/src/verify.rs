//! FILENAME: core/store/src/verify.rs
//! PURPOSE: Post-load checks of a database against the files it was built from.

use std::fmt;
use std::path::Path;

use dataset::EntityKind;
use rusqlite::Connection;

use crate::error::StoreError;

/// Row count of one table next to the row count of its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCount {
    pub kind: EntityKind,
    pub file_rows: usize,
    pub table_rows: usize,
}

impl TableCount {
    pub fn matches(&self) -> bool {
        self.file_rows == self.table_rows
    }
}

/// One row reported by `PRAGMA foreign_key_check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyViolation {
    pub table: String,
    pub rowid: Option<i64>,
    pub parent: String,
}

impl fmt::Display for ForeignKeyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rowid {
            Some(rowid) => write!(f, "{} row {} references a missing {} row", self.table, rowid, self.parent),
            None => write!(f, "{} references a missing {} row", self.table, self.parent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub tables: Vec<TableCount>,
    pub foreign_key_violations: Vec<ForeignKeyViolation>,
}

impl VerifyReport {
    pub fn is_consistent(&self) -> bool {
        self.tables.iter().all(TableCount::matches) && self.foreign_key_violations.is_empty()
    }
}

/// Compares every table with its file in `data_dir` and runs the foreign key check.
pub fn verify_store(db_path: &Path, data_dir: &Path) -> Result<VerifyReport, StoreError> {
    if !data_dir.is_dir() {
        return Err(StoreError::MissingDataDir(data_dir.to_path_buf()));
    }
    let conn = crate::open_read_only(db_path)?;

    let mut tables = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let count = TableCount {
            kind,
            file_rows: count_file_rows(&data_dir.join(kind.file_name()))?,
            table_rows: count_table_rows(&conn, kind)?,
        };
        if !count.matches() {
            log::warn!(
                "{}: {} rows in file, {} rows in table",
                kind.table_name(),
                count.file_rows,
                count.table_rows
            );
        }
        tables.push(count);
    }

    let foreign_key_violations = foreign_key_check(&conn)?;
    for violation in &foreign_key_violations {
        log::warn!("foreign key violation: {}", violation);
    }

    Ok(VerifyReport {
        tables,
        foreign_key_violations,
    })
}

fn count_file_rows(path: &Path) -> Result<usize, StoreError> {
    if !path.exists() {
        return Err(StoreError::Dataset(dataset::DatasetError::MissingFile(path.to_path_buf())));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

fn count_table_rows(conn: &Connection, kind: EntityKind) -> Result<usize, StoreError> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table_name());
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

fn foreign_key_check(conn: &Connection) -> Result<Vec<ForeignKeyViolation>, StoreError> {
    let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
    let violations = stmt
        .query_map([], |row| {
            Ok(ForeignKeyViolation {
                table: row.get(0)?,
                rowid: row.get(1)?,
                parent: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::apply_schema;
    use dataset::{write_dataset, Customer, Dataset, Order};
    use tempfile::tempdir;

    fn one_order_dataset() -> Dataset {
        Dataset {
            customers: vec![Customer {
                customer_id: 1,
                name: "Ana Rossi".to_string(),
                email: "ana@example.com".to_string(),
                created_at: "2023-01-01T00:00:00".to_string(),
            }],
            orders: vec![Order {
                order_id: 1,
                customer_id: 1,
                order_date: "2024-01-01T00:00:00".to_string(),
                total_amount: 0.0,
            }],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_verify_detects_count_mismatch_and_dangling_keys() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let db_path = dir.path().join("ecom.db");
        write_dataset(&data_dir, &one_order_dataset()).unwrap();
        {
            // Enforcement off so the dangling row can be written
            let conn = Connection::open(&db_path).unwrap();
            apply_schema(&conn).unwrap();
            conn.pragma_update(None, "foreign_keys", "OFF").unwrap();
            conn.execute_batch(
                "INSERT INTO customers VALUES (1, 'Ana Rossi', 'ana@example.com', '2023-01-01T00:00:00');
                 INSERT INTO orders VALUES (1, 1, '2024-01-01T00:00:00', 0.0);
                 INSERT INTO orders VALUES (2, 7, '2024-01-02T00:00:00', 0.0);",
            )
            .unwrap();
        }

        let report = verify_store(&db_path, &data_dir).unwrap();

        assert!(!report.is_consistent());
        let orders = report.tables.iter().find(|t| t.kind == EntityKind::Orders).unwrap();
        assert_eq!((orders.file_rows, orders.table_rows), (1, 2));
        assert_eq!(report.foreign_key_violations.len(), 1);
        assert_eq!(report.foreign_key_violations[0].table, "orders");
        assert_eq!(report.foreign_key_violations[0].parent, "customers");
    }

    #[test]
    fn test_verify_requires_database() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        write_dataset(&data_dir, &Dataset::default()).unwrap();

        let result = verify_store(&dir.path().join("ecom.db"), &data_dir);
        assert!(matches!(result, Err(StoreError::MissingDatabase(_))));
    }
}
