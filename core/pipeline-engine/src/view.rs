//! FILENAME: core/pipeline-engine/src/view.rs
//! Dashboard View - The renderable output of one pipeline run.
//!
//! Every panel of the dashboard has a plain data type here. The presentation
//! layer only reads these; it never touches the cache.

use chrono::{NaiveDate, NaiveDateTime};
use dataset::EntityId;
use serde::{Deserialize, Serialize};

use crate::definition::FilterConfig;

/// Headline scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_orders: usize,
    pub total_customers: usize,
}

/// One point of the monthly sales series. `month` is the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: NaiveDate,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRank {
    pub product_id: EntityId,
    pub product_name: String,
    pub total_quantity: i64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRank {
    pub customer_id: EntityId,
    /// Absent when the customer row is missing from the snapshot.
    pub customer_name: Option<String>,
    pub total_spent: f64,
}

/// Review counts per rating value 1..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    counts: [u64; 5],
}

impl RatingDistribution {
    /// Counts one review. Ratings outside 1..=5 are ignored.
    pub fn record(&mut self, rating: u8) {
        if (1..=5).contains(&rating) {
            self.counts[usize::from(rating - 1)] += 1;
        }
    }

    pub fn count(&self, rating: u8) -> u64 {
        match rating {
            1..=5 => self.counts[usize::from(rating - 1)],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// No reviews left after filtering.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// `(rating, count)` for every rating value, ascending.
    pub fn buckets(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(idx, count)| (idx as u8 + 1, *count))
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentReview {
    pub review_date: Option<NaiveDateTime>,
    pub product_id: EntityId,
    pub product_name: Option<String>,
    pub customer_id: EntityId,
    pub rating: u8,
    pub review_text: String,
}

/// Everything the dashboard shows for one filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// The configuration this view was computed for.
    pub filter: FilterConfig,
    pub kpis: Kpis,
    pub monthly_sales: Vec<MonthlySales>,
    pub top_products: Vec<ProductRank>,
    pub top_customers: Vec<CustomerRank>,
    pub ratings: RatingDistribution,
    /// `None` when the recent-reviews panel is toggled off.
    pub recent_reviews: Option<Vec<RecentReview>>,
}

impl DashboardView {
    /// True when no sales survived the filters.
    pub fn has_no_sales(&self) -> bool {
        self.monthly_sales.is_empty()
            && self.top_products.is_empty()
            && self.top_customers.is_empty()
    }
}
