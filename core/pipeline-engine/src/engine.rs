//! FILENAME: core/pipeline-engine/src/engine.rs
//! Pipeline Engine - Transforms a cached snapshot into a dashboard view.
//!
//! This module takes a FilterConfig (user intent) and a PipelineCache (data)
//! and produces a DashboardView (panels ready for rendering).
//!
//! Algorithm:
//! 1. Filter orders by the date range
//! 2. Inner-join order items to the filtered orders, left-join products
//! 3. Drop lines outside the selected category, derive line totals
//! 4. Aggregate: KPIs, monthly series, product and customer rankings
//! 5. Filter reviews by category for the rating distribution and recent list
//!
//! `compute` is pure: the same cache and config always give the same view.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use dataset::{Dataset, EntityId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cache::{CachedOrder, CachedReview, PipelineCache, ProductInfo};
use crate::definition::{CategoryFilter, DateRange, FilterConfig};
use crate::view::{
    CustomerRank, DashboardView, Kpis, MonthlySales, ProductRank, RatingDistribution,
    RecentReview,
};

// ============================================================================
// JOINED LINES
// ============================================================================

/// One order item joined to its order and (optionally) its product.
#[derive(Debug, Clone)]
struct SalesLine<'a> {
    order_id: EntityId,
    customer_id: EntityId,
    order_date: NaiveDateTime,
    product_id: EntityId,
    product: Option<&'a ProductInfo>,
    quantity: i64,
    line_total: f64,
}

/// Running totals for one ranking group.
#[derive(Debug, Clone, Copy, Default)]
struct SalesAccumulator {
    quantity: i64,
    spent: f64,
}

impl SalesAccumulator {
    fn add(&mut self, quantity: i64, line_total: f64) {
        self.quantity += quantity;
        self.spent += line_total;
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Builds the cache for `dataset` and computes one view.
/// Sessions that recompute on every filter change should build the cache once
/// and call [`compute`] instead.
pub fn compute_dashboard(dataset: &Dataset, config: &FilterConfig) -> DashboardView {
    compute(&PipelineCache::build(dataset), config)
}

/// Runs the full pipeline for one filter configuration.
pub fn compute(cache: &PipelineCache, config: &FilterConfig) -> DashboardView {
    // Step 1: date filter
    let orders = filter_orders(cache.orders(), &config.date_range);

    // Steps 2-4: joins, category filter, line totals
    let lines = join_lines(cache, &orders, &config.category);

    // Step 5: KPIs
    let kpis = compute_kpis(&orders, &lines, &config.category);

    // Steps 6-8: series and rankings
    let monthly_sales = monthly_sales(&lines);
    let top_products = rank_products(&lines, config.top_n);
    let top_customers = rank_customers(cache, &lines, config.top_n);

    // Steps 9-10: reviews (category filtered only)
    let reviews = filter_reviews(cache, &config.category);
    let mut ratings = RatingDistribution::default();
    for review in &reviews {
        ratings.record(review.rating);
    }
    let recent_reviews = config
        .show_recent_reviews
        .then(|| recent_reviews(cache, &reviews, config.recent_limit));

    log::debug!(
        "pipeline range={} category={} orders={} lines={} reviews={}",
        config.date_range,
        config.category,
        orders.len(),
        lines.len(),
        reviews.len()
    );

    DashboardView {
        filter: config.clone(),
        kpis,
        monthly_sales,
        top_products,
        top_customers,
        ratings,
        recent_reviews,
    }
}

// ============================================================================
// STAGES
// ============================================================================

/// Orders whose timestamp falls inside the range, in source order.
/// Orders without a readable timestamp never match.
fn filter_orders<'a>(orders: &'a [CachedOrder], range: &DateRange) -> Vec<&'a CachedOrder> {
    orders
        .iter()
        .filter(|order| order.order_date.is_some_and(|ts| range.contains(&ts)))
        .collect()
}

/// Inner join items → filtered orders, left join → products, then the
/// category filter. Item order is preserved.
fn join_lines<'a>(
    cache: &'a PipelineCache,
    orders: &[&CachedOrder],
    category: &CategoryFilter,
) -> Vec<SalesLine<'a>> {
    let order_index: FxHashMap<EntityId, &CachedOrder> =
        orders.iter().map(|order| (order.order_id, *order)).collect();

    cache
        .order_items()
        .iter()
        .filter_map(|item| {
            let order = order_index.get(&item.order_id)?;
            let order_date = order.order_date?;
            let product = cache.product(item.product_id);
            if !category.matches(product.map(|p| p.category.as_str())) {
                return None;
            }
            Some(SalesLine {
                order_id: order.order_id,
                customer_id: order.customer_id,
                order_date,
                product_id: item.product_id,
                product,
                quantity: item.quantity,
                line_total: item.quantity as f64 * item.unit_price,
            })
        })
        .collect()
}

/// Order and customer counts come from the date-filtered orders. With a
/// category selected, only orders that kept at least one line are counted.
fn compute_kpis(orders: &[&CachedOrder], lines: &[SalesLine<'_>], category: &CategoryFilter) -> Kpis {
    let total_sales = lines.iter().map(|line| line.line_total).sum();

    let scoped_orders: Option<FxHashSet<EntityId>> = if category.is_all() {
        None
    } else {
        Some(lines.iter().map(|line| line.order_id).collect())
    };

    let mut order_ids = FxHashSet::default();
    let mut customer_ids = FxHashSet::default();
    for order in orders {
        if let Some(scope) = &scoped_orders {
            if !scope.contains(&order.order_id) {
                continue;
            }
        }
        order_ids.insert(order.order_id);
        customer_ids.insert(order.customer_id);
    }

    Kpis {
        total_sales,
        total_orders: order_ids.len(),
        total_customers: customer_ids.len(),
    }
}

fn month_start(timestamp: &NaiveDateTime) -> NaiveDate {
    let date = timestamp.date();
    date.with_day(1).unwrap_or(date)
}

fn monthly_sales(lines: &[SalesLine<'_>]) -> Vec<MonthlySales> {
    let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for line in lines {
        *by_month.entry(month_start(&line.order_date)).or_default() += line.line_total;
    }
    by_month
        .into_iter()
        .map(|(month, sales)| MonthlySales { month, sales })
        .collect()
}

/// Groups by (product_id, name) in ascending key order, then a stable
/// descending sort on quantity. Lines without a product match have no name
/// and are left out of the ranking.
fn rank_products(lines: &[SalesLine<'_>], top_n: usize) -> Vec<ProductRank> {
    let mut groups: BTreeMap<(EntityId, &str), SalesAccumulator> = BTreeMap::new();
    for line in lines {
        if let Some(product) = line.product {
            groups
                .entry((line.product_id, product.name.as_str()))
                .or_default()
                .add(line.quantity, line.line_total);
        }
    }

    let mut ranked: Vec<ProductRank> = groups
        .into_iter()
        .map(|((product_id, name), acc)| ProductRank {
            product_id,
            product_name: name.to_string(),
            total_quantity: acc.quantity,
            total_spent: acc.spent,
        })
        .collect();
    ranked.sort_by_key(|rank| Reverse(rank.total_quantity));
    ranked.truncate(top_n);
    ranked
}

/// Groups by customer in ascending id order, attaches the name, then a stable
/// descending sort on spend.
fn rank_customers(cache: &PipelineCache, lines: &[SalesLine<'_>], top_n: usize) -> Vec<CustomerRank> {
    let mut groups: BTreeMap<EntityId, SalesAccumulator> = BTreeMap::new();
    for line in lines {
        groups
            .entry(line.customer_id)
            .or_default()
            .add(line.quantity, line.line_total);
    }

    let mut ranked: Vec<CustomerRank> = groups
        .into_iter()
        .map(|(customer_id, acc)| CustomerRank {
            customer_id,
            customer_name: cache.customer_name(customer_id).map(str::to_string),
            total_spent: acc.spent,
        })
        .collect();
    ranked.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    ranked.truncate(top_n);
    ranked
}

fn filter_reviews<'a>(cache: &'a PipelineCache, category: &CategoryFilter) -> Vec<&'a CachedReview> {
    cache
        .reviews()
        .iter()
        .filter(|review| {
            category.matches(cache.product(review.product_id).map(|p| p.category.as_str()))
        })
        .collect()
}

/// Newest first; reviews without a readable date sort last.
fn recent_reviews(cache: &PipelineCache, reviews: &[&CachedReview], limit: usize) -> Vec<RecentReview> {
    let mut ordered: Vec<&CachedReview> = reviews.to_vec();
    ordered.sort_by(|a, b| match (a.review_date, b.review_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    ordered
        .into_iter()
        .take(limit)
        .map(|review| RecentReview {
            review_date: review.review_date,
            product_id: review.product_id,
            product_name: cache.product(review.product_id).map(|p| p.name.clone()),
            customer_id: review.customer_id,
            rating: review.rating,
            review_text: review.review_text.clone(),
        })
        .collect()
}
