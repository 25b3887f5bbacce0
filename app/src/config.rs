//! FILENAME: app/src/config.rs
//! PURPOSE: Application settings, read from a JSON file with per-field defaults.

use std::fs;
use std::path::{Path, PathBuf};

use dataset::GeneratorConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ecom-dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the generated CSV files.
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    /// Where charts and exports are written.
    pub output_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("data"),
            db_path: PathBuf::from("ecom.db"),
            output_dir: PathBuf::from("dashboard_out"),
            log_file: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl AppConfig {
    /// An explicit path must exist. Without one, `ecom-dashboard.json` is used
    /// when present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(AppConfig::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
