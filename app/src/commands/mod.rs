//! FILENAME: app/src/commands/mod.rs
pub mod dashboard;
pub mod generate;
pub mod ingest;
pub mod interactive;
pub mod query;
pub mod verify;

use std::path::Path;

use pipeline_engine::PipelineCache;

use crate::error::AppError;
use crate::log_info;

/// Reads the snapshot from the database and normalises it for the pipeline.
pub fn load_cache(db_path: &Path) -> Result<PipelineCache, AppError> {
    let dataset = store::load_snapshot(db_path)?;
    let cache = PipelineCache::build(&dataset);
    log_info!(
        "SNAPSHOT",
        "loaded {} orders, {} items, {} reviews, {} categories from {}",
        cache.orders().len(),
        cache.order_items().len(),
        cache.reviews().len(),
        cache.categories().len(),
        db_path.display()
    );
    Ok(cache)
}
