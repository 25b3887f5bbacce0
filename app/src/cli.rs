//! FILENAME: app/src/cli.rs
//! Command-line surface.
//!
//! # Commands
//!
//! - `ecom-dashboard generate` - Write a synthetic dataset as CSV files
//! - `ecom-dashboard ingest` - Load the CSV files into SQLite
//! - `ecom-dashboard verify` - Compare the database with the files
//! - `ecom-dashboard dashboard` - Render the dashboard once
//! - `ecom-dashboard interactive` - Adjust filters in a prompt loop
//! - `ecom-dashboard query` - Run an SQL file and export the result as CSV
//!
//! # Examples
//!
//! ```bash
//! ecom-dashboard generate --seed 7
//! ecom-dashboard ingest --fresh
//! ecom-dashboard dashboard --from 2024-01-01 --to 2024-06-30 --category books --top-n 5
//! ```

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use pipeline_engine::{DEFAULT_RECENT_LIMIT, DEFAULT_TOP_N};

use crate::config::AppConfig;

/// Synthetic e-commerce analytics: generate, ingest, query and dashboard
#[derive(Parser, Debug)]
#[command(name = "ecom-dashboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: ./ecom-dashboard.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a synthetic dataset as CSV files
    Generate {
        /// Output directory for the CSV files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        customers: Option<usize>,

        #[arg(long)]
        products: Option<usize>,

        #[arg(long)]
        orders: Option<usize>,

        #[arg(long)]
        reviews: Option<usize>,

        /// Latest generated timestamp (YYYY-MM-DDTHH:MM:SS, default: now)
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<NaiveDateTime>,
    },

    /// Load the CSV files into the SQLite database
    Ingest {
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        db: Option<PathBuf>,

        /// Delete an existing database first
        #[arg(long)]
        fresh: bool,
    },

    /// Compare table row counts with the files and check foreign keys
    Verify {
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Render the dashboard once
    Dashboard(DashboardArgs),

    /// Adjust filters in a prompt loop
    Interactive {
        #[arg(long)]
        db: Option<PathBuf>,

        /// Directory for exports with relative paths
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Run an SQL file and export the result as CSV
    Query {
        #[arg(long)]
        db: Option<PathBuf>,

        /// SQL file to execute
        #[arg(long, default_value = "top_products_per_customer.sql")]
        sql: PathBuf,

        /// CSV output file
        #[arg(long, default_value = "top_products_per_customer.csv")]
        out: PathBuf,

        /// Rows printed after the export
        #[arg(long, default_value_t = store::DEFAULT_PREVIEW_ROWS)]
        preview: usize,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Start date (YYYY-MM-DD, default: earliest order)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD, default: latest order)
    #[arg(long)]
    pub to: Option<String>,

    /// Product category, or "All"
    #[arg(long, default_value = "All")]
    pub category: String,

    /// Length of the ranked tables (5-20)
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Hide the recent reviews table
    #[arg(long)]
    pub no_reviews: bool,

    /// Number of recent reviews (10-12)
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub recent_limit: usize,

    /// Skip the SVG charts
    #[arg(long)]
    pub no_charts: bool,

    /// Directory for the SVG charts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Export the view as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Export the view as an XLSX workbook
    #[arg(long)]
    pub xlsx: Option<PathBuf>,
}

fn parse_anchor(text: &str) -> Result<NaiveDateTime, String> {
    dataset::parse_timestamp(text).ok_or_else(|| format!("invalid timestamp '{}'", text))
}

impl Command {
    /// Writes the flags that shadow settings into `config`.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match self {
            Command::Generate {
                data_dir,
                seed,
                customers,
                products,
                orders,
                reviews,
                anchor,
            } => {
                set(&mut config.data_dir, data_dir);
                set(&mut config.generator.seed, seed);
                set(&mut config.generator.customers, customers);
                set(&mut config.generator.products, products);
                set(&mut config.generator.orders, orders);
                set(&mut config.generator.reviews, reviews);
                set(&mut config.generator.anchor, anchor);
            }
            Command::Ingest { data_dir, db, .. } | Command::Verify { data_dir, db } => {
                set(&mut config.data_dir, data_dir);
                set(&mut config.db_path, db);
            }
            Command::Dashboard(args) => {
                set(&mut config.db_path, &args.db);
                set(&mut config.output_dir, &args.output_dir);
            }
            Command::Interactive { db, output_dir } => {
                set(&mut config.db_path, db);
                set(&mut config.output_dir, output_dir);
            }
            Command::Query { db, .. } => set(&mut config.db_path, db),
        }
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dashboard_flags() {
        let cli = Cli::try_parse_from([
            "ecom-dashboard",
            "-v",
            "dashboard",
            "--from",
            "2024-01-01",
            "--category",
            "books",
            "--top-n",
            "5",
            "--no-reviews",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Dashboard(args) => {
                assert_eq!(args.from.as_deref(), Some("2024-01-01"));
                assert!(args.to.is_none());
                assert_eq!(args.category, "books");
                assert_eq!(args.top_n, 5);
                assert!(args.no_reviews);
                assert_eq!(args.recent_limit, DEFAULT_RECENT_LIMIT);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let cli = Cli::try_parse_from([
            "ecom-dashboard",
            "generate",
            "--seed",
            "9",
            "--anchor",
            "2024-05-01T12:00:00",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.command.apply_overrides(&mut config);

        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.generator.orders, 1000);
        assert_eq!(config.generator.anchor.to_string(), "2024-05-01 12:00:00");
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_query_defaults() {
        let cli = Cli::try_parse_from(["ecom-dashboard", "query"]).unwrap();
        match cli.command {
            Command::Query { sql, out, preview, db } => {
                assert_eq!(sql, PathBuf::from("top_products_per_customer.sql"));
                assert_eq!(out, PathBuf::from("top_products_per_customer.csv"));
                assert_eq!(preview, 5);
                assert!(db.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
