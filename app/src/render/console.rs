//! FILENAME: app/src/render/console.rs
//! PURPOSE: Plain-text rendering of a dashboard view.

use std::io::{self, Write};

use pipeline_engine::DashboardView;

pub const TITLE: &str = "E-commerce Dashboard (synthetic data)";
pub const FOOTER: &str = "Data: synthetic e-commerce dataset (generated).";
pub const NO_REVIEWS: &str = "No reviews available.";

const BAR_WIDTH: usize = 40;
const REVIEW_TEXT_WIDTH: usize = 60;

// ============================================================================
// FORMATTING
// ============================================================================

/// `1234.5` → `₹1,234.50`
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, grouped, cents % 100)
}

/// Right-aligns numeric-looking cells, left-aligns the rest.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let pad = |cell: &str, width: usize| -> String {
        let fill = width.saturating_sub(cell.chars().count());
        let numeric = cell
            .trim_start_matches(['-', '₹'])
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        if numeric {
            format!("{}{}", " ".repeat(fill), cell)
        } else {
            format!("{}{}", cell, " ".repeat(fill))
        }
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string(),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| pad(cell, *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string(),
        );
    }
    lines.join("\n")
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub fn render_dashboard(view: &DashboardView, out: &mut dyn Write) -> io::Result<()> {
    let filter = &view.filter;

    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}", "=".repeat(TITLE.chars().count()))?;
    writeln!(
        out,
        "Range: {}   Category: {}   Top N: {}",
        filter.date_range, filter.category, filter.top_n
    )?;
    writeln!(out)?;

    // KPIs
    writeln!(
        out,
        "Total sales: {}   Orders: {}   Active customers: {}",
        format_money(view.kpis.total_sales),
        view.kpis.total_orders,
        view.kpis.total_customers
    )?;
    writeln!(out)?;

    // Monthly series
    writeln!(out, "Monthly sales")?;
    if view.monthly_sales.is_empty() {
        writeln!(out, "No sales in the selected range.")?;
    } else {
        let max = view
            .monthly_sales
            .iter()
            .map(|m| m.sales)
            .fold(0.0_f64, f64::max);
        let rows: Vec<Vec<String>> = view
            .monthly_sales
            .iter()
            .map(|m| {
                vec![
                    m.month.format("%Y-%m").to_string(),
                    format_money(m.sales),
                    bar(m.sales, max),
                ]
            })
            .collect();
        writeln!(out, "{}", format_table(&["month", "sales", ""], &rows))?;
    }
    writeln!(out)?;

    // Rankings
    writeln!(out, "Top {} products by quantity", filter.top_n)?;
    let rows: Vec<Vec<String>> = view
        .top_products
        .iter()
        .map(|p| {
            vec![
                p.product_id.to_string(),
                p.product_name.clone(),
                p.total_quantity.to_string(),
                format_money(p.total_spent),
            ]
        })
        .collect();
    writeln!(
        out,
        "{}",
        format_table(&["product_id", "product_name", "quantity", "spend"], &rows)
    )?;
    writeln!(out)?;

    writeln!(out, "Top {} customers by spend", filter.top_n)?;
    let rows: Vec<Vec<String>> = view
        .top_customers
        .iter()
        .map(|c| {
            vec![
                c.customer_id.to_string(),
                c.customer_name.clone().unwrap_or_default(),
                format_money(c.total_spent),
            ]
        })
        .collect();
    writeln!(
        out,
        "{}",
        format_table(&["customer_id", "customer_name", "spend"], &rows)
    )?;
    writeln!(out)?;

    // Reviews
    writeln!(out, "Ratings distribution")?;
    if view.ratings.is_empty() {
        writeln!(out, "{}", NO_REVIEWS)?;
    } else {
        let max = view.ratings.max_count() as f64;
        for (rating, count) in view.ratings.buckets() {
            writeln!(out, "{} | {:>5} {}", rating, count, bar(count as f64, max))?;
        }
    }

    if let Some(recent) = &view.recent_reviews {
        writeln!(out)?;
        writeln!(out, "Recent reviews")?;
        if recent.is_empty() {
            writeln!(out, "{}", NO_REVIEWS)?;
        } else {
            let rows: Vec<Vec<String>> = recent
                .iter()
                .map(|r| {
                    vec![
                        r.review_date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                        r.product_name.clone().unwrap_or_else(|| r.product_id.to_string()),
                        r.rating.to_string(),
                        truncate(&r.review_text, REVIEW_TEXT_WIDTH),
                    ]
                })
                .collect();
            writeln!(
                out,
                "{}",
                format_table(&["date", "product", "rating", "review"], &rows)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", FOOTER)?;
    Ok(())
}
