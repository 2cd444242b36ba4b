//! CLI argument parsing for wfcheck.
//!
//! Uses clap derive macros for declarative argument definitions. The actual
//! run lives in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

/// wfcheck: static validator for CI workflow definitions.
///
/// Parses workflow documents, syntax-checks their inline scripts under the
/// interpreter each one will run with, and enforces the release pipeline's
/// trigger, job wiring, matrix, and signing-gate rules. Nothing is executed.
#[derive(Parser, Debug)]
#[command(name = "wfcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workflow files or directories containing workflow files.
    ///
    /// Defaults to the configured release workflow path.
    pub paths: Vec<PathBuf>,

    /// Config file (default: .wfcheck.yaml in the working directory, if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the document lint pass.
    #[arg(long)]
    pub no_lint: bool,

    /// Timeout in seconds for each external checker invocation.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print the full report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
