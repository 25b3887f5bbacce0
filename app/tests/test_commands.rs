//! FILENAME: tests/test_commands.rs
//! Integration tests for the command pipeline: generate → ingest → verify → dashboard/query.

mod common;

use app_lib::render::charts::{PRODUCTS_CHART, RATINGS_CHART, SALES_CHART};
use app_lib::render::console::{FOOTER, TITLE};
use app_lib::AppError;
use common::TestHarness;
use pipeline_engine::ConfigError;
use store::StoreError;

// ============================================================================
// GENERATE / INGEST / VERIFY
// ============================================================================

#[test]
fn test_generate_writes_all_files() {
    let harness = TestHarness::new();
    let output = harness.run(&["generate"]).unwrap();

    for file in ["customers.csv", "products.csv", "orders.csv", "order_items.csv", "reviews.csv"] {
        assert!(harness.config.data_dir.join(file).is_file(), "{} missing", file);
    }
    assert!(output.contains("Wrote 150 rows"));
    assert!(output.contains("Data generated in"));
}

#[test]
fn test_ingest_without_data_fails() {
    let harness = TestHarness::new();
    let err = harness.run(&["ingest"]).unwrap_err();

    assert!(matches!(err, AppError::Store(StoreError::MissingDataDir(_))));
    assert!(err.to_string().contains("data folder not found"));
}

#[test]
fn test_ingest_reports_tables() {
    let harness = TestHarness::new();
    harness.run(&["generate"]).unwrap();
    let output = harness.run(&["ingest"]).unwrap();

    assert!(output.contains("Inserted 40 rows into customers"));
    assert!(output.contains("Inserted 150 rows into orders"));
    assert!(output.contains("Ingestion complete."));

    // Re-running needs --fresh
    assert!(harness.run(&["ingest"]).is_err());
    assert!(harness.run(&["ingest", "--fresh"]).is_ok());
}

#[test]
fn test_verify_after_ingest() {
    let harness = TestHarness::with_database();
    let output = harness.run(&["verify"]).unwrap();

    assert!(output.contains("Foreign keys: ok"));
    assert!(output.contains("Store is consistent."));
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[test]
fn test_dashboard_default_view() {
    let harness = TestHarness::with_database();
    let output = harness.run(&["dashboard"]).unwrap();

    assert!(output.starts_with(TITLE));
    assert!(output.contains("Total sales: ₹"));
    assert!(output.contains("Top 10 products by quantity"));
    assert!(output.contains("Top 10 customers by spend"));
    assert!(output.contains("Recent reviews"));
    assert!(output.trim_end().ends_with(FOOTER));

    for chart in [SALES_CHART, PRODUCTS_CHART, RATINGS_CHART] {
        assert!(harness.config.output_dir.join(chart).is_file(), "{} missing", chart);
    }
}

#[test]
fn test_dashboard_with_filters() {
    let harness = TestHarness::with_database();
    let output = harness
        .run(&["dashboard", "--category", "books", "--top-n", "5", "--no-reviews", "--no-charts"])
        .unwrap();

    assert!(output.contains("Category: books"));
    assert!(output.contains("Top 5 products by quantity"));
    assert!(!output.contains("Recent reviews"));
    assert!(!harness.config.output_dir.join(SALES_CHART).exists());
}

#[test]
fn test_dashboard_empty_range() {
    let harness = TestHarness::with_database();
    let output = harness
        .run(&["dashboard", "--from", "2040-01-01", "--to", "2040-12-31", "--no-charts"])
        .unwrap();

    assert!(output.contains("Total sales: ₹0.00   Orders: 0   Active customers: 0"));
    assert!(output.contains("No sales in the selected range."));
    // Reviews are not date filtered
    assert!(!output.contains("No reviews available."));
}

#[test]
fn test_dashboard_rejects_out_of_range_top_n() {
    let harness = TestHarness::with_database();
    let err = harness.run(&["dashboard", "--top-n", "3"]).unwrap_err();
    assert!(matches!(err, AppError::Filter(ConfigError::TopNOutOfRange(3))));
}

#[test]
fn test_dashboard_rejects_bad_date() {
    let harness = TestHarness::with_database();
    let err = harness.run(&["dashboard", "--from", "01/02/2024"]).unwrap_err();
    assert!(matches!(err, AppError::Filter(ConfigError::InvalidDate(_))));
}

#[test]
fn test_dashboard_without_database() {
    let harness = TestHarness::new();
    let err = harness.run(&["dashboard"]).unwrap_err();
    assert!(matches!(err, AppError::Store(StoreError::MissingDatabase(_))));
}

// ============================================================================
// QUERY
// ============================================================================

#[test]
fn test_query_exports_csv() {
    let harness = TestHarness::with_database();
    let sql_path = harness.path("orders_per_customer.sql");
    std::fs::write(
        &sql_path,
        "SELECT customer_id, COUNT(*) AS orders FROM orders GROUP BY customer_id ORDER BY orders DESC;",
    )
    .unwrap();
    let csv_path = harness.path("orders_per_customer.csv");

    let output = harness
        .run(&[
            "query",
            "--sql",
            sql_path.to_str().unwrap(),
            "--out",
            csv_path.to_str().unwrap(),
            "--preview",
            "3",
        ])
        .unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("customer_id,orders\n"));
    assert!(output.contains("Query exported to"));
    assert!(output.contains("customer_id"));
}

#[test]
fn test_query_with_malformed_sql() {
    let harness = TestHarness::with_database();
    let sql_path = harness.path("broken.sql");
    std::fs::write(&sql_path, "SELECT FROM WHERE").unwrap();
    let csv_path = harness.path("broken.csv");

    let err = harness
        .run(&["query", "--sql", sql_path.to_str().unwrap(), "--out", csv_path.to_str().unwrap()])
        .unwrap_err();

    assert!(matches!(err, AppError::Store(StoreError::Sqlite(_))));
    assert!(!csv_path.exists());
}
