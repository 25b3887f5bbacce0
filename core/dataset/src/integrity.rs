//! FILENAME: core/dataset/src/integrity.rs
//! PURPOSE: Checks the referential and value invariants of a dataset.

use std::collections::HashSet;
use std::fmt;

use crate::entities::{Dataset, EntityId, EntityKind};

/// A single broken invariant, located by table and row id.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityViolation {
    /// A foreign key pointing at a row that does not exist.
    DanglingReference {
        table: EntityKind,
        row_id: EntityId,
        column: &'static str,
        target: EntityKind,
        value: EntityId,
    },
    RatingOutOfRange { review_id: EntityId, rating: i64 },
    NonPositiveQuantity { order_item_id: EntityId, quantity: i64 },
    NegativePrice { table: EntityKind, row_id: EntityId, price: f64 },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::DanglingReference { table, row_id, column, target, value } => write!(
                f,
                "{}[{}].{} = {} has no matching row in {}",
                table, row_id, column, value, target
            ),
            IntegrityViolation::RatingOutOfRange { review_id, rating } => {
                write!(f, "reviews[{}].rating = {} is outside 1..=5", review_id, rating)
            }
            IntegrityViolation::NonPositiveQuantity { order_item_id, quantity } => {
                write!(f, "order_items[{}].quantity = {} is below 1", order_item_id, quantity)
            }
            IntegrityViolation::NegativePrice { table, row_id, price } => {
                write!(f, "{}[{}] has negative price {}", table, row_id, price)
            }
        }
    }
}

/// Returns every violation found; an empty list means the dataset is consistent.
pub fn check_integrity(dataset: &Dataset) -> Vec<IntegrityViolation> {
    let customer_ids: HashSet<EntityId> = dataset.customers.iter().map(|c| c.customer_id).collect();
    let product_ids: HashSet<EntityId> = dataset.products.iter().map(|p| p.product_id).collect();
    let order_ids: HashSet<EntityId> = dataset.orders.iter().map(|o| o.order_id).collect();

    let mut violations = Vec::new();
    let mut dangling = |table: EntityKind,
                        row_id: EntityId,
                        column: &'static str,
                        target: EntityKind,
                        value: EntityId,
                        known: &HashSet<EntityId>| {
        if !known.contains(&value) {
            violations.push(IntegrityViolation::DanglingReference {
                table,
                row_id,
                column,
                target,
                value,
            });
        }
    };

    for order in &dataset.orders {
        dangling(
            EntityKind::Orders,
            order.order_id,
            "customer_id",
            EntityKind::Customers,
            order.customer_id,
            &customer_ids,
        );
    }

    for item in &dataset.order_items {
        dangling(
            EntityKind::OrderItems,
            item.order_item_id,
            "order_id",
            EntityKind::Orders,
            item.order_id,
            &order_ids,
        );
        dangling(
            EntityKind::OrderItems,
            item.order_item_id,
            "product_id",
            EntityKind::Products,
            item.product_id,
            &product_ids,
        );
    }

    for review in &dataset.reviews {
        dangling(
            EntityKind::Reviews,
            review.review_id,
            "product_id",
            EntityKind::Products,
            review.product_id,
            &product_ids,
        );
        dangling(
            EntityKind::Reviews,
            review.review_id,
            "customer_id",
            EntityKind::Customers,
            review.customer_id,
            &customer_ids,
        );
    }

    for review in &dataset.reviews {
        if !(1..=5).contains(&review.rating) {
            violations.push(IntegrityViolation::RatingOutOfRange {
                review_id: review.review_id,
                rating: review.rating,
            });
        }
    }

    for item in &dataset.order_items {
        if item.quantity < 1 {
            violations.push(IntegrityViolation::NonPositiveQuantity {
                order_item_id: item.order_item_id,
                quantity: item.quantity,
            });
        }
        if item.unit_price < 0.0 {
            violations.push(IntegrityViolation::NegativePrice {
                table: EntityKind::OrderItems,
                row_id: item.order_item_id,
                price: item.unit_price,
            });
        }
    }

    for product in &dataset.products {
        if product.price < 0.0 {
            violations.push(IntegrityViolation::NegativePrice {
                table: EntityKind::Products,
                row_id: product.product_id,
                price: product.price,
            });
        }
    }

    violations
}
