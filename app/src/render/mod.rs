//! FILENAME: app/src/render/mod.rs
pub mod charts;
pub mod console;
pub mod export;
pub mod workbook;

pub use charts::write_charts;
pub use console::{format_money, render_dashboard};
pub use export::{export_view, load_json, save_json, ExportFormat};
pub use workbook::save_workbook;
