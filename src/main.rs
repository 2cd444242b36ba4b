//! wfcheck: static validator for CI workflow definitions.
//!
//! This is the main entry point for the `wfcheck` CLI. It sets up logging,
//! parses arguments, runs validation, and maps the outcome to an exit code.

mod cli;
mod commands;
pub mod config;
pub mod diagnostics;
pub mod dialect;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod lint;
pub mod process;
pub mod release;
pub mod script;
pub mod validate;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    // Logging goes to stderr and respects RUST_LOG; quiet by default.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            if let Some(line) = err.stderr_line() {
                eprintln!("{}", line);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
