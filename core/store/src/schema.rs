//! FILENAME: core/store/src/schema.rs
//! PURPOSE: DDL for the five entity tables and their secondary indexes.

use dataset::EntityKind;
use rusqlite::Connection;

/// Tables first (parents before children), then indexes. Idempotent.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY,
    name TEXT,
    email TEXT,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS products (
    product_id INTEGER PRIMARY KEY,
    name TEXT,
    category TEXT,
    price REAL,
    sku TEXT
);

CREATE TABLE IF NOT EXISTS orders (
    order_id INTEGER PRIMARY KEY,
    customer_id INTEGER,
    order_date TEXT,
    total_amount REAL,
    FOREIGN KEY(customer_id) REFERENCES customers(customer_id)
);

CREATE TABLE IF NOT EXISTS order_items (
    order_item_id INTEGER PRIMARY KEY,
    order_id INTEGER,
    product_id INTEGER,
    quantity INTEGER,
    unit_price REAL,
    FOREIGN KEY(order_id) REFERENCES orders(order_id),
    FOREIGN KEY(product_id) REFERENCES products(product_id)
);

CREATE TABLE IF NOT EXISTS reviews (
    review_id INTEGER PRIMARY KEY,
    product_id INTEGER,
    customer_id INTEGER,
    rating INTEGER,
    review_text TEXT,
    review_date TEXT,
    FOREIGN KEY(product_id) REFERENCES products(product_id),
    FOREIGN KEY(customer_id) REFERENCES customers(customer_id)
);

CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id);
CREATE INDEX IF NOT EXISTS idx_orderitems_order ON order_items(order_id);
";

pub const INDEXES: [&str; 2] = ["idx_orders_customer", "idx_orderitems_order"];

/// Turns on foreign key enforcement for this connection and creates the schema.
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.execute_batch(SCHEMA_SQL)
}

/// `INSERT INTO <table> (<cols>) VALUES (?1, ...)` in `EntityKind::columns` order.
pub fn insert_statement(kind: EntityKind) -> String {
    let columns = kind.columns();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        kind.table_name(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Selects every column, ordered by the primary key.
pub fn select_statement(kind: EntityKind) -> String {
    let columns = kind.columns();
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        columns.join(", "),
        kind.table_name(),
        columns[0]
    )
}

/// Names of the user-defined objects of one type (`table` or `index`), sorted.
pub fn object_names(conn: &Connection, object_type: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([object_type], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();

        let tables = object_names(&conn, "table").unwrap();
        assert_eq!(
            tables,
            vec!["customers", "order_items", "orders", "products", "reviews"]
        );
        let indexes = object_names(&conn, "index").unwrap();
        for index in INDEXES {
            assert!(indexes.iter().any(|name| name == index));
        }
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO orders (order_id, customer_id, order_date, total_amount) VALUES (1, 99, '2024-01-01T00:00:00', 1.0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_statements_follow_column_order() {
        assert_eq!(
            insert_statement(EntityKind::Orders),
            "INSERT INTO orders (order_id, customer_id, order_date, total_amount) VALUES (?1, ?2, ?3, ?4)"
        );
        assert_eq!(
            select_statement(EntityKind::Customers),
            "SELECT customer_id, name, email, created_at FROM customers ORDER BY customer_id"
        );
    }
}
