//! FILENAME: app/src/commands/interactive.rs

use std::io::{BufRead, Write};

use crate::commands::load_cache;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::run_session;

pub fn execute(config: &AppConfig, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), AppError> {
    let cache = load_cache(&config.db_path)?;
    run_session(&cache, &config.output_dir, input, out)
}
