//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for ecom-dashboard integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use app_lib::{dispatch, AppConfig, AppError, Cli};
use chrono::NaiveDate;
use clap::Parser;
use tempfile::TempDir;

/// Isolated working area with its own data directory and database.
pub struct TestHarness {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestHarness {
    /// Small, deterministic settings inside a fresh temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig {
            data_dir: dir.path().join("data"),
            db_path: dir.path().join("ecom.db"),
            output_dir: dir.path().join("out"),
            ..AppConfig::default()
        };
        config.generator.customers = 40;
        config.generator.products = 25;
        config.generator.orders = 150;
        config.generator.reviews = 60;
        config.generator.anchor = NaiveDate::from_ymd_opt(2025, 1, 15)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        TestHarness { dir, config }
    }

    /// Generated and ingested.
    pub fn with_database() -> Self {
        let harness = Self::new();
        harness.run(&["generate"]).unwrap();
        harness.run(&["ingest"]).unwrap();
        harness
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Runs a command line (without the program name) and returns stdout.
    pub fn run(&self, args: &[&str]) -> Result<String, AppError> {
        self.run_with_input(args, "")
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> Result<String, AppError> {
        let cli = Cli::try_parse_from(std::iter::once("ecom-dashboard").chain(args.iter().copied()))
            .unwrap();
        let mut config = self.config.clone();
        cli.command.apply_overrides(&mut config);

        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        dispatch(&cli.command, &config, &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }
}
