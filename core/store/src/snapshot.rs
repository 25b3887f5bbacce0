//! FILENAME: core/store/src/snapshot.rs
//! PURPOSE: Reads the five tables back into an in-memory dataset.
//! CONTEXT: Text columns are read as raw SQLite values and rendered as text,
//! so a timestamp stored as INTEGER or REAL still reaches the pipeline.

use std::path::Path;

use dataset::{Customer, Dataset, EntityKind, Order, OrderItem, Product, Review};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::schema::select_statement;

/// Loads every table, ordered by primary key.
pub fn load_snapshot(db_path: &Path) -> Result<Dataset, StoreError> {
    let conn = crate::open_read_only(db_path)?;

    let dataset = Dataset {
        customers: read_rows(&conn, EntityKind::Customers, |row| {
            Ok(Customer {
                customer_id: row.get(0)?,
                name: text(row, 1)?,
                email: text(row, 2)?,
                created_at: text(row, 3)?,
            })
        })?,
        products: read_rows(&conn, EntityKind::Products, |row| {
            Ok(Product {
                product_id: row.get(0)?,
                name: text(row, 1)?,
                category: text(row, 2)?,
                price: real(row, 3)?,
                sku: text(row, 4)?,
            })
        })?,
        orders: read_rows(&conn, EntityKind::Orders, |row| {
            Ok(Order {
                order_id: row.get(0)?,
                customer_id: row.get(1)?,
                order_date: text(row, 2)?,
                total_amount: real(row, 3)?,
            })
        })?,
        order_items: read_rows(&conn, EntityKind::OrderItems, |row| {
            Ok(OrderItem {
                order_item_id: row.get(0)?,
                order_id: row.get(1)?,
                product_id: row.get(2)?,
                quantity: row.get(3)?,
                unit_price: real(row, 4)?,
            })
        })?,
        reviews: read_rows(&conn, EntityKind::Reviews, |row| {
            Ok(Review {
                review_id: row.get(0)?,
                product_id: row.get(1)?,
                customer_id: row.get(2)?,
                rating: row.get(3)?,
                review_text: text(row, 4)?,
                review_date: text(row, 5)?,
            })
        })?,
    };

    log::debug!(
        "snapshot loaded from {}: {:?}",
        db_path.display(),
        dataset.row_counts()
    );
    Ok(dataset)
}

fn read_rows<T, F>(conn: &Connection, kind: EntityKind, map: F) -> Result<Vec<T>, StoreError>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(&select_statement(kind))?;
    let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

/// Any storage class as text; NULL becomes the empty string.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// NULL prices read as zero.
fn real(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(row.get::<_, Option<f64>>(idx)?.unwrap_or(0.0))
}
