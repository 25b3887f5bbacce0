//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (CLI bridge).
// CONTEXT: `run` wires flags, settings and logging, then hands off to one command.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;

pub use cli::{Cli, Command, DashboardArgs};
pub use config::AppConfig;
pub use error::AppError;
pub use logging::{init_log_file, init_logging, next_seq, write_log};
pub use session::{Session, SessionCommand, SessionError};

/// Executes one parsed command against the resolved settings.
pub fn dispatch(
    command: &Command,
    config: &AppConfig,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Generate { .. } => commands::generate::execute(config, out),
        Command::Ingest { fresh, .. } => commands::ingest::execute(config, *fresh, out),
        Command::Verify { .. } => commands::verify::execute(config, out),
        Command::Dashboard(args) => commands::dashboard::execute(config, args, out),
        Command::Interactive { .. } => commands::interactive::execute(config, input, out),
        Command::Query { sql, out: csv_path, preview, .. } => {
            commands::query::execute(config, sql, csv_path, *preview, out)
        }
    }
}

/// Resolves settings: file first, then `--log-file` and the command flags.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    cli.command.apply_overrides(&mut config);
    Ok(config)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref());

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            log_error!("CONFIG", "{}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.log_file.is_none() {
        if let Some(path) = &config.log_file {
            if let Err(e) = init_log_file(path) {
                eprintln!("[LOG_INIT] {}", e);
            }
        }
    }
    log_debug!("CONFIG", "{:?}", config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match dispatch(&cli.command, &config, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = out.flush();
            log_error!("APP", "{}", e);
            ExitCode::FAILURE
        }
    }
}
