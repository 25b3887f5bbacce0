//! FILENAME: core/pipeline-engine/src/cache.rs
//! Pipeline Cache - Normalised internal representation of a snapshot.
//!
//! The cache is built once per session and is read-only afterwards:
//! - Timestamps are parsed once, so re-running the pipeline never re-parses text
//! - Products and customers are indexed by id for the joins
//! - Widget bounds (date span, category list) are recorded during the build

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use dataset::{parse_timestamp, Dataset, EntityId};
use rustc_hash::FxHashMap;

/// Product attributes attached by the product join.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedOrder {
    pub order_id: EntityId,
    pub customer_id: EntityId,
    /// `None` when the stored text could not be read as a timestamp.
    pub order_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedItem {
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedReview {
    pub product_id: EntityId,
    pub customer_id: EntityId,
    pub rating: u8,
    pub review_text: String,
    pub review_date: Option<NaiveDateTime>,
}

/// Counters collected while building the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub unparsable_order_dates: usize,
    pub unparsable_review_dates: usize,
    /// Reviews dropped because their rating was outside 1..=5.
    pub dropped_reviews: usize,
}

/// The normalised snapshot the engine computes over.
#[derive(Debug, Clone, Default)]
pub struct PipelineCache {
    orders: Vec<CachedOrder>,
    order_items: Vec<CachedItem>,
    products: FxHashMap<EntityId, ProductInfo>,
    customer_names: FxHashMap<EntityId, String>,
    reviews: Vec<CachedReview>,
    categories: Vec<String>,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
    stats: CacheStats,
}

impl PipelineCache {
    /// Builds the cache in one pass over each table.
    pub fn build(dataset: &Dataset) -> Self {
        let mut stats = CacheStats::default();

        let orders: Vec<CachedOrder> = dataset
            .orders
            .iter()
            .map(|order| {
                let order_date = parse_timestamp(&order.order_date);
                if order_date.is_none() {
                    stats.unparsable_order_dates += 1;
                }
                CachedOrder {
                    order_id: order.order_id,
                    customer_id: order.customer_id,
                    order_date,
                }
            })
            .collect();

        let date_bounds = orders
            .iter()
            .filter_map(|order| order.order_date.map(|ts| ts.date()))
            .fold(None, |bounds: Option<(NaiveDate, NaiveDate)>, date| match bounds {
                None => Some((date, date)),
                Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
            });

        let order_items = dataset
            .order_items
            .iter()
            .map(|item| CachedItem {
                order_id: item.order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        let mut products = FxHashMap::default();
        let mut categories = BTreeSet::new();
        for product in &dataset.products {
            if !product.category.is_empty() {
                categories.insert(product.category.clone());
            }
            products.insert(
                product.product_id,
                ProductInfo {
                    name: product.name.clone(),
                    category: product.category.clone(),
                },
            );
        }

        let customer_names = dataset
            .customers
            .iter()
            .map(|customer| (customer.customer_id, customer.name.clone()))
            .collect();

        let mut reviews = Vec::with_capacity(dataset.reviews.len());
        for review in &dataset.reviews {
            let rating = match u8::try_from(review.rating) {
                Ok(rating) if (1..=5).contains(&rating) => rating,
                _ => {
                    stats.dropped_reviews += 1;
                    continue;
                }
            };
            let review_date = parse_timestamp(&review.review_date);
            if review_date.is_none() {
                stats.unparsable_review_dates += 1;
            }
            reviews.push(CachedReview {
                product_id: review.product_id,
                customer_id: review.customer_id,
                rating,
                review_text: review.review_text.clone(),
                review_date,
            });
        }

        if stats != CacheStats::default() {
            log::warn!(
                "snapshot normalised with unparsable_order_dates={} unparsable_review_dates={} dropped_reviews={}",
                stats.unparsable_order_dates,
                stats.unparsable_review_dates,
                stats.dropped_reviews
            );
        }

        PipelineCache {
            orders,
            order_items,
            products,
            customer_names,
            reviews,
            categories: categories.into_iter().collect(),
            date_bounds,
            stats,
        }
    }

    pub fn orders(&self) -> &[CachedOrder] {
        &self.orders
    }

    pub fn order_items(&self) -> &[CachedItem] {
        &self.order_items
    }

    pub fn reviews(&self) -> &[CachedReview] {
        &self.reviews
    }

    pub fn product(&self, product_id: EntityId) -> Option<&ProductInfo> {
        self.products.get(&product_id)
    }

    pub fn customer_name(&self, customer_id: EntityId) -> Option<&str> {
        self.customer_names.get(&customer_id).map(String::as_str)
    }

    /// Distinct product categories, sorted ascending (without "All").
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Earliest and latest order date; `None` when no order has a readable date.
    pub fn order_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_bounds
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{Order, Product, Review};

    fn product(id: EntityId, category: &str) -> Product {
        Product {
            product_id: id,
            name: format!("Product {}", id),
            category: category.to_string(),
            price: 10.0,
            sku: format!("SKU{:05}", id),
        }
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let dataset = Dataset {
            products: vec![product(1, "toys"), product(2, "books"), product(3, "toys")],
            ..Dataset::default()
        };
        let cache = PipelineCache::build(&dataset);
        assert_eq!(cache.categories(), &["books".to_string(), "toys".to_string()]);
    }

    #[test]
    fn test_text_dates_are_normalised() {
        let dataset = Dataset {
            orders: vec![
                Order {
                    order_id: 1,
                    customer_id: 1,
                    order_date: "2024-05-03 08:00:00".to_string(),
                    total_amount: 0.0,
                },
                Order {
                    order_id: 2,
                    customer_id: 1,
                    order_date: "not a date".to_string(),
                    total_amount: 0.0,
                },
                Order {
                    order_id: 3,
                    customer_id: 1,
                    order_date: "2023-11-20T23:10:00".to_string(),
                    total_amount: 0.0,
                },
            ],
            ..Dataset::default()
        };
        let cache = PipelineCache::build(&dataset);

        assert!(cache.orders()[0].order_date.is_some());
        assert!(cache.orders()[1].order_date.is_none());
        assert_eq!(cache.stats().unparsable_order_dates, 1);
        assert_eq!(
            cache.order_date_bounds(),
            Some((
                NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
            ))
        );
    }

    #[test]
    fn test_out_of_range_ratings_are_dropped() {
        let review = |id: EntityId, rating: i64| Review {
            review_id: id,
            product_id: 1,
            customer_id: 1,
            rating,
            review_text: String::new(),
            review_date: "2024-01-01T00:00:00".to_string(),
        };
        let dataset = Dataset {
            reviews: vec![review(1, 0), review(2, 3), review(3, 9)],
            ..Dataset::default()
        };
        let cache = PipelineCache::build(&dataset);
        assert_eq!(cache.reviews().len(), 1);
        assert_eq!(cache.stats().dropped_reviews, 2);
    }

    #[test]
    fn test_empty_snapshot_has_no_bounds() {
        let cache = PipelineCache::build(&Dataset::default());
        assert!(cache.order_date_bounds().is_none());
        assert!(cache.categories().is_empty());
    }
}
