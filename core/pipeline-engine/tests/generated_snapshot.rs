//! FILENAME: core/pipeline-engine/tests/generated_snapshot.rs
//! Pipeline properties checked against a generated snapshot.

use chrono::NaiveDate;
use dataset::{generate, Dataset, GeneratorConfig, CATEGORIES};
use pipeline_engine::{compute, CategoryFilter, DateRange, FilterConfig, PipelineCache};

fn snapshot() -> Dataset {
    let anchor = NaiveDate::from_ymd_opt(2025, 3, 15)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    generate(&GeneratorConfig::default().with_anchor(anchor))
}

#[test]
fn test_total_sales_matches_line_totals() {
    let dataset = snapshot();
    let cache = PipelineCache::build(&dataset);
    let config = FilterConfig::defaults_for(&cache);
    let view = compute(&cache, &config);

    let expected: f64 = dataset
        .order_items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_price)
        .sum();
    assert!((view.kpis.total_sales - expected).abs() < 1e-6);
    assert_eq!(view.kpis.total_orders, dataset.orders.len());

    let monthly: f64 = view.monthly_sales.iter().map(|m| m.sales).sum();
    assert!((monthly - view.kpis.total_sales).abs() < 1e-6);
}

#[test]
fn test_category_sales_partition_total() {
    let cache = PipelineCache::build(&snapshot());
    let all = FilterConfig::defaults_for(&cache);
    let total = compute(&cache, &all).kpis.total_sales;

    let per_category: f64 = CATEGORIES
        .iter()
        .map(|category| {
            compute(&cache, &all.with_category(CategoryFilter::parse(category)))
                .kpis
                .total_sales
        })
        .sum();
    assert!((per_category - total).abs() < 1e-6);
}

#[test]
fn test_rankings_respect_top_n_and_order() {
    let cache = PipelineCache::build(&snapshot());
    for top_n in [5, 12, 20] {
        let view = compute(&cache, &FilterConfig::defaults_for(&cache).with_top_n(top_n));

        assert!(view.top_products.len() <= top_n);
        assert!(view.top_customers.len() <= top_n);
        assert!(view
            .top_products
            .windows(2)
            .all(|w| w[0].total_quantity >= w[1].total_quantity));
        assert!(view
            .top_customers
            .windows(2)
            .all(|w| w[0].total_spent >= w[1].total_spent));
    }
}

#[test]
fn test_ratings_cover_every_review() {
    let dataset = snapshot();
    let cache = PipelineCache::build(&dataset);
    let view = compute(&cache, &FilterConfig::defaults_for(&cache));

    assert_eq!(view.ratings.total(), dataset.reviews.len() as u64);
}

#[test]
fn test_future_range_is_empty() {
    let cache = PipelineCache::build(&snapshot());
    let config = FilterConfig::defaults_for(&cache).with_date_range(DateRange::new(
        NaiveDate::from_ymd_opt(2040, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2040, 12, 31).unwrap(),
    ));
    let view = compute(&cache, &config);

    assert_eq!(view.kpis.total_orders, 0);
    assert_eq!(view.kpis.total_sales, 0.0);
    assert!(view.has_no_sales());
}
