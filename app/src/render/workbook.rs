//! FILENAME: app/src/render/workbook.rs
//! PURPOSE: Writes a dashboard view as an XLSX workbook, one sheet per panel.

use std::path::Path;

use pipeline_engine::DashboardView;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::AppError;

const MONEY_FORMAT: &str = "#,##0.00";

struct Formats {
    header: Format,
    money: Format,
}

pub fn save_workbook(view: &DashboardView, path: &Path) -> Result<(), AppError> {
    let formats = Formats {
        header: Format::new().set_bold(),
        money: Format::new().set_num_format(MONEY_FORMAT),
    };
    let mut workbook = Workbook::new();

    write_kpis(workbook.add_worksheet(), view, &formats)?;
    write_monthly(workbook.add_worksheet(), view, &formats)?;
    write_products(workbook.add_worksheet(), view, &formats)?;
    write_customers(workbook.add_worksheet(), view, &formats)?;
    write_ratings(workbook.add_worksheet(), view, &formats)?;
    if let Some(recent) = &view.recent_reviews {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Recent Reviews")?;
        write_headers(sheet, &["date", "product_id", "product_name", "customer_id", "rating", "review"], &formats)?;
        for (idx, review) in recent.iter().enumerate() {
            let row = idx as u32 + 1;
            let date = review
                .review_date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            sheet.write_string(row, 0, date)?;
            sheet.write_number(row, 1, review.product_id as f64)?;
            sheet.write_string(row, 2, review.product_name.clone().unwrap_or_default())?;
            sheet.write_number(row, 3, review.customer_id as f64)?;
            sheet.write_number(row, 4, f64::from(review.rating))?;
            sheet.write_string(row, 5, review.review_text.as_str())?;
        }
        sheet.set_column_width(5, 80)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], formats: &Formats) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
        sheet.set_column_width(col as u16, 16)?;
    }
    Ok(())
}

fn write_kpis(sheet: &mut Worksheet, view: &DashboardView, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name("KPIs")?;
    write_headers(sheet, &["metric", "value"], formats)?;
    sheet.write_string(1, 0, "Total sales")?;
    sheet.write_number_with_format(1, 1, view.kpis.total_sales, &formats.money)?;
    sheet.write_string(2, 0, "Orders")?;
    sheet.write_number(2, 1, view.kpis.total_orders as f64)?;
    sheet.write_string(3, 0, "Active customers")?;
    sheet.write_number(3, 1, view.kpis.total_customers as f64)?;
    sheet.write_string(5, 0, "Range")?;
    sheet.write_string(5, 1, view.filter.date_range.to_string())?;
    sheet.write_string(6, 0, "Category")?;
    sheet.write_string(6, 1, view.filter.category.label())?;
    Ok(())
}

fn write_monthly(sheet: &mut Worksheet, view: &DashboardView, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name("Monthly Sales")?;
    write_headers(sheet, &["month", "sales"], formats)?;
    for (idx, point) in view.monthly_sales.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, point.month.format("%Y-%m").to_string())?;
        sheet.write_number_with_format(row, 1, point.sales, &formats.money)?;
    }
    Ok(())
}

fn write_products(sheet: &mut Worksheet, view: &DashboardView, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name("Top Products")?;
    write_headers(sheet, &["product_id", "product_name", "quantity", "spend"], formats)?;
    for (idx, product) in view.top_products.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, product.product_id as f64)?;
        sheet.write_string(row, 1, product.product_name.as_str())?;
        sheet.write_number(row, 2, product.total_quantity as f64)?;
        sheet.write_number_with_format(row, 3, product.total_spent, &formats.money)?;
    }
    Ok(())
}

fn write_customers(sheet: &mut Worksheet, view: &DashboardView, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name("Top Customers")?;
    write_headers(sheet, &["customer_id", "customer_name", "spend"], formats)?;
    for (idx, customer) in view.top_customers.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, customer.customer_id as f64)?;
        sheet.write_string(row, 1, customer.customer_name.clone().unwrap_or_default())?;
        sheet.write_number_with_format(row, 2, customer.total_spent, &formats.money)?;
    }
    Ok(())
}

fn write_ratings(sheet: &mut Worksheet, view: &DashboardView, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name("Ratings")?;
    write_headers(sheet, &["rating", "reviews"], formats)?;
    for (rating, count) in view.ratings.buckets() {
        let row = u32::from(rating);
        sheet.write_number(row, 0, f64::from(rating))?;
        sheet.write_number(row, 1, count as f64)?;
    }
    Ok(())
}
