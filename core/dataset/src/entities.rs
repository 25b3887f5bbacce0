//! FILENAME: core/dataset/src/entities.rs
//! PURPOSE: Row types for the five e-commerce entities.
//! CONTEXT: Field names double as CSV headers and SQLite column names, so they
//! must stay in sync with the schema in `store`. Timestamps are kept as the
//! text they were stored with; normalisation happens in the pipeline cache.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier type shared by every entity (SQLite INTEGER PRIMARY KEY).
pub type EntityId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: EntityId,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: EntityId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub order_date: String,
    /// Denormalized sum of the order's line totals.
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: EntityId,
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub quantity: i64,
    /// Product price at the time of sale.
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: EntityId,
    pub product_id: EntityId,
    pub customer_id: EntityId,
    pub rating: i64,
    pub review_text: String,
    pub review_date: String,
}

// ============================================================================
// ENTITY KIND
// ============================================================================

/// The five entity tables, in dependency (load) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Customers,
    Products,
    Orders,
    OrderItems,
    Reviews,
}

impl EntityKind {
    /// Parents come before children so foreign keys always resolve on insert.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Customers,
        EntityKind::Products,
        EntityKind::Orders,
        EntityKind::OrderItems,
        EntityKind::Reviews,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Customers => "customers",
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
            EntityKind::OrderItems => "order_items",
            EntityKind::Reviews => "reviews",
        }
    }

    /// Column names, in CSV header and SQLite column order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Customers => &["customer_id", "name", "email", "created_at"],
            EntityKind::Products => &["product_id", "name", "category", "price", "sku"],
            EntityKind::Orders => &["order_id", "customer_id", "order_date", "total_amount"],
            EntityKind::OrderItems => {
                &["order_item_id", "order_id", "product_id", "quantity", "unit_price"]
            }
            EntityKind::Reviews => &[
                "review_id",
                "product_id",
                "customer_id",
                "rating",
                "review_text",
                "review_date",
            ],
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            EntityKind::Customers => "customers.csv",
            EntityKind::Products => "products.csv",
            EntityKind::Orders => "orders.csv",
            EntityKind::OrderItems => "order_items.csv",
            EntityKind::Reviews => "reviews.csv",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

// ============================================================================
// ENTITY ROW
// ============================================================================

/// Ties a row type to its table.
pub trait EntityRow: Serialize + DeserializeOwned {
    const KIND: EntityKind;
}

impl EntityRow for Customer {
    const KIND: EntityKind = EntityKind::Customers;
}

impl EntityRow for Product {
    const KIND: EntityKind = EntityKind::Products;
}

impl EntityRow for Order {
    const KIND: EntityKind = EntityKind::Orders;
}

impl EntityRow for OrderItem {
    const KIND: EntityKind = EntityKind::OrderItems;
}

impl EntityRow for Review {
    const KIND: EntityKind = EntityKind::Reviews;
}

// ============================================================================
// DATASET
// ============================================================================

/// A complete snapshot of all five tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Customers => self.customers.len(),
            EntityKind::Products => self.products.len(),
            EntityKind::Orders => self.orders.len(),
            EntityKind::OrderItems => self.order_items.len(),
            EntityKind::Reviews => self.reviews.len(),
        }
    }

    /// Row counts for every table in load order.
    pub fn row_counts(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .iter()
            .map(|kind| (*kind, self.row_count(*kind)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|kind| self.row_count(*kind) == 0)
    }
}
