//! FILENAME: app/src/render/charts.rs
//! PURPOSE: SVG charts for the monthly series, the product ranking and the ratings.
//! CONTEXT: A chart with no data is skipped, so the returned list only names
//! files that were written.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use pipeline_engine::{DashboardView, MonthlySales, ProductRank, RatingDistribution};
use plotters::prelude::*;

use crate::error::AppError;

pub const SALES_CHART: &str = "sales_monthly.svg";
pub const PRODUCTS_CHART: &str = "top_products.svg";
pub const RATINGS_CHART: &str = "ratings.svg";

const CHART_SIZE: (u32, u32) = (900, 480);

type ChartResult = Result<(), Box<dyn Error>>;

/// Writes every non-empty chart into `dir` (created if needed).
pub fn write_charts(view: &DashboardView, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if !view.monthly_sales.is_empty() {
        let path = dir.join(SALES_CHART);
        draw_monthly_sales(&view.monthly_sales, &path).map_err(chart_error)?;
        written.push(path);
    }

    if !view.top_products.is_empty() {
        let path = dir.join(PRODUCTS_CHART);
        draw_top_products(&view.top_products, &path).map_err(chart_error)?;
        written.push(path);
    }

    if !view.ratings.is_empty() {
        let path = dir.join(RATINGS_CHART);
        draw_ratings(&view.ratings, &path).map_err(chart_error)?;
        written.push(path);
    }

    Ok(written)
}

fn chart_error(err: Box<dyn Error>) -> AppError {
    AppError::Chart(err.to_string())
}

/// Line with point markers, one point per month.
fn draw_monthly_sales(series: &[MonthlySales], path: &Path) -> ChartResult {
    let labels: Vec<String> = series.iter().map(|m| m.month.format("%Y-%m").to_string()).collect();
    let max = series.iter().map(|m| m.sales).fold(0.0_f64, f64::max);
    let last = series.len().saturating_sub(1) as i32;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly sales", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0..last.max(1), 0f64..(max * 1.1).max(1.0))?;

    let label_for = |idx: &i32| -> String {
        usize::try_from(*idx)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(labels.len().min(12))
        .x_label_formatter(&label_for)
        .x_desc("Month")
        .y_desc("Sales")
        .draw()?;

    let points: Vec<(i32, f64)> = series
        .iter()
        .enumerate()
        .map(|(idx, m)| (idx as i32, m.sales))
        .collect();
    chart.draw_series(LineSeries::new(points.clone(), &BLUE))?;
    chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))?;

    root.present()?;
    Ok(())
}

/// Horizontal bars, largest on top.
fn draw_top_products(ranking: &[ProductRank], path: &Path) -> ChartResult {
    // Ascending so the largest bar is drawn last, at the top
    let ordered: Vec<&ProductRank> = ranking.iter().rev().collect();
    let max = ordered.iter().map(|p| p.total_quantity).max().unwrap_or(0);
    let count = ordered.len() as i32;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top products by quantity", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d(0i64..(max + 1), (0..count).into_segmented())?;

    let label_for = |value: &SegmentValue<i32>| -> String {
        match value {
            SegmentValue::CenterOf(idx) => usize::try_from(*idx)
                .ok()
                .and_then(|i| ordered.get(i))
                .map(|p| p.product_name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(ordered.len() + 1)
        .y_label_formatter(&label_for)
        .x_desc("Quantity")
        .draw()?;

    chart.draw_series(ordered.iter().enumerate().map(|(idx, product)| {
        let idx = idx as i32;
        Rectangle::new(
            [
                (0, SegmentValue::Exact(idx)),
                (product.total_quantity, SegmentValue::Exact(idx + 1)),
            ],
            BLUE.mix(0.7).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Five-bucket histogram of ratings.
fn draw_ratings(ratings: &RatingDistribution, path: &Path) -> ChartResult {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Ratings distribution", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((1u32..5u32).into_segmented(), 0u64..(ratings.max_count() + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Rating")
        .y_desc("Reviews")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(GREEN.mix(0.7).filled())
            .margin(8)
            .data(ratings.buckets().map(|(rating, count)| (u32::from(rating), count))),
    )?;

    root.present()?;
    Ok(())
}
