//! FILENAME: core/store/src/loader.rs
//! PURPOSE: Bulk load of the generated files into SQLite.
//! CONTEXT: One transaction per table with a single prepared insert. Tables
//! load parents first so foreign keys resolve while enforcement is on.

use std::fs;
use std::path::{Path, PathBuf};

use dataset::{read_table, Customer, EntityKind, EntityRow, Order, OrderItem, Product, Review};
use rusqlite::{params, Connection, Statement};

use crate::error::StoreError;
use crate::schema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Delete an existing database file before loading.
    pub fresh: bool,
}

/// Rows inserted per table, in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub db_path: PathBuf,
    pub tables: Vec<(EntityKind, usize)>,
}

impl IngestReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|(_, rows)| rows).sum()
    }

    pub fn rows_for(&self, kind: EntityKind) -> Option<usize> {
        self.tables
            .iter()
            .find(|(table, _)| *table == kind)
            .map(|(_, rows)| *rows)
    }
}

/// Binds one row to the table's prepared insert.
trait InsertRow: EntityRow {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl InsertRow for Customer {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.customer_id, self.name, self.email, self.created_at])
    }
}

impl InsertRow for Product {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.product_id, self.name, self.category, self.price, self.sku])
    }
}

impl InsertRow for Order {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.order_id, self.customer_id, self.order_date, self.total_amount])
    }
}

impl InsertRow for OrderItem {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.order_item_id,
            self.order_id,
            self.product_id,
            self.quantity,
            self.unit_price
        ])
    }
}

impl InsertRow for Review {
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.review_id,
            self.product_id,
            self.customer_id,
            self.rating,
            self.review_text,
            self.review_date
        ])
    }
}

/// Creates the schema in `db_path` (if absent) and appends every file in
/// `data_dir` to its table.
pub fn ingest_directory(
    data_dir: &Path,
    db_path: &Path,
    options: IngestOptions,
) -> Result<IngestReport, StoreError> {
    if !data_dir.is_dir() {
        return Err(StoreError::MissingDataDir(data_dir.to_path_buf()));
    }

    if options.fresh && db_path.exists() {
        fs::remove_file(db_path)?;
        log::info!("removed existing database {}", db_path.display());
    }

    let mut conn = Connection::open(db_path)?;
    schema::apply_schema(&conn)?;

    let tables = vec![
        (EntityKind::Customers, load_table::<Customer>(&mut conn, data_dir)?),
        (EntityKind::Products, load_table::<Product>(&mut conn, data_dir)?),
        (EntityKind::Orders, load_table::<Order>(&mut conn, data_dir)?),
        (EntityKind::OrderItems, load_table::<OrderItem>(&mut conn, data_dir)?),
        (EntityKind::Reviews, load_table::<Review>(&mut conn, data_dir)?),
    ];

    log::info!("Ingestion complete. DB: {}", db_path.display());
    Ok(IngestReport {
        db_path: db_path.to_path_buf(),
        tables,
    })
}

fn load_table<T: InsertRow>(conn: &mut Connection, data_dir: &Path) -> Result<usize, StoreError> {
    let rows: Vec<T> = read_table(&data_dir.join(T::KIND.file_name()))?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&schema::insert_statement(T::KIND))?;
        for row in &rows {
            row.insert(&mut stmt)?;
        }
    }
    tx.commit()?;

    log::info!("Inserted {} rows into {}", rows.len(), T::KIND.table_name());
    Ok(rows.len())
}
