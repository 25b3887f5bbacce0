//! FILENAME: app/src/commands/dashboard.rs
//! PURPOSE: One-shot dashboard: console tables, SVG charts and optional exports.

use std::io::Write;

use pipeline_engine::{compute, parse_date, CategoryFilter, FilterConfig, PipelineCache};

use crate::cli::DashboardArgs;
use crate::commands::load_cache;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::render::{export_view, render_dashboard, write_charts};
use crate::{log_info, log_warn};

/// Widget defaults for the snapshot, overridden by the flags that were given.
pub fn filter_from_args(cache: &PipelineCache, args: &DashboardArgs) -> Result<FilterConfig, AppError> {
    let mut config = FilterConfig::defaults_for(cache);
    if let Some(from) = &args.from {
        config = config.with_start(parse_date(from)?);
    }
    if let Some(to) = &args.to {
        config = config.with_end(parse_date(to)?);
    }

    let category = CategoryFilter::parse(&args.category);
    if let CategoryFilter::Only(name) = &category {
        if !cache.categories().iter().any(|c| c == name) {
            log_warn!("DASHBOARD", "category '{}' has no products in this snapshot", name);
        }
    }

    let config = config
        .with_category(category)
        .with_top_n(args.top_n)
        .with_recent_reviews(!args.no_reviews)
        .with_recent_limit(args.recent_limit);
    config.validate()?;

    if config.date_range.is_empty() {
        log_warn!("DASHBOARD", "start date is after end date ({})", config.date_range);
    }
    Ok(config)
}

pub fn execute(config: &AppConfig, args: &DashboardArgs, out: &mut dyn Write) -> Result<(), AppError> {
    let cache = load_cache(&config.db_path)?;
    let filter = filter_from_args(&cache, args)?;
    let view = compute(&cache, &filter);

    render_dashboard(&view, out)?;

    if !args.no_charts {
        for path in write_charts(&view, &config.output_dir)? {
            log_info!("DASHBOARD", "chart written to {}", path.display());
        }
    }
    for path in [&args.json, &args.xlsx].into_iter().flatten() {
        export_view(&view, path)?;
        log_info!("DASHBOARD", "view exported to {}", path.display());
    }
    Ok(())
}
