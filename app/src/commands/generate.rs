//! FILENAME: app/src/commands/generate.rs
//! PURPOSE: Writes a synthetic dataset into the data directory.

use std::io::Write;

use dataset::{check_integrity, generate, write_dataset};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::{log_info, log_warn};

pub fn execute(config: &AppConfig, out: &mut dyn Write) -> Result<(), AppError> {
    let generator = &config.generator;
    log_info!(
        "GENERATE",
        "seed={} customers={} products={} orders={} reviews={} anchor={}",
        generator.seed,
        generator.customers,
        generator.products,
        generator.orders,
        generator.reviews,
        generator.anchor
    );

    let dataset = generate(generator);
    let violations = check_integrity(&dataset);
    for violation in &violations {
        log_warn!("GENERATE", "{}", violation);
    }

    let counts = write_dataset(&config.data_dir, &dataset)?;
    for (kind, rows) in &counts {
        writeln!(out, "Wrote {} rows to {}", rows, config.data_dir.join(kind.file_name()).display())?;
    }
    writeln!(out, "Data generated in {}", config.data_dir.display())?;
    Ok(())
}
