//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point with unified logging.
// FORMAT: seq|level|category|message

use std::process::ExitCode;

fn main() -> ExitCode {
    app_lib::run()
}
