//! FILENAME: app/src/render/export.rs
//! PURPOSE: Saves a dashboard view in the format named by the file extension.

use std::fs;
use std::path::Path;

use pipeline_engine::DashboardView;

use crate::error::AppError;
use crate::render::workbook::save_workbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ExportFormat::Json),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

pub fn save_json(view: &DashboardView, path: &Path) -> Result<(), AppError> {
    fs::write(path, serde_json::to_string_pretty(view)?)?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<DashboardView, AppError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Creates the parent directory, then writes JSON or XLSX.
pub fn export_view(view: &DashboardView, path: &Path) -> Result<(), AppError> {
    let format = ExportFormat::from_path(path).ok_or_else(|| {
        AppError::Config(format!(
            "unsupported export format for {} (use .json or .xlsx)",
            path.display()
        ))
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Json => save_json(view, path),
        ExportFormat::Xlsx => save_workbook(view, path),
    }
}
