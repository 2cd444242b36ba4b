//! Command implementation for wfcheck.
//!
//! Resolves config, discovers documents, probes external checkers once,
//! runs validation, and prints the outcome. Diagnostics decide the exit
//! status through [`WfcheckError::ValidationFailed`].

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, WfcheckError};
use crate::script::Toolchain;
use crate::validate::{Report, discover_documents, validate_all};
use std::path::PathBuf;
use tracing::info;

/// Run a full validation pass for the parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| WfcheckError::Io(format!("failed to read working directory: {}", e)))?;
    let config = effective_config(&cli, Config::resolve(cli.config.as_deref(), &cwd)?)?;

    let inputs: Vec<PathBuf> = if cli.paths.is_empty() {
        config.default_paths.iter().map(PathBuf::from).collect()
    } else {
        cli.paths.clone()
    };

    let documents = discover_documents(&inputs, &config.document_globset()?)?;
    if documents.is_empty() {
        return Err(WfcheckError::NoInput);
    }
    info!(count = documents.len(), "validating workflow documents");

    let tools = Toolchain::detect(&config);
    let report = validate_all(&documents, &config, &tools);

    print_report(&report, cli.json)?;

    if report.passed() {
        Ok(())
    } else {
        Err(WfcheckError::ValidationFailed(report.problem_count()))
    }
}

/// Apply command-line overrides on top of the loaded config.
fn effective_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(timeout) = cli.timeout {
        config.check_timeout_seconds = timeout;
    }
    if cli.no_lint {
        config.lint.enabled = false;
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    if json {
        let rendered = serde_json::to_string_pretty(report)
            .map_err(|e| WfcheckError::Io(format!("failed to render JSON report: {}", e)))?;
        println!("{}", rendered);
    } else if report.passed() {
        println!("{}", report.format_success());
    } else {
        eprint!("{}", report.format_failure());
    }

    Ok(())
}
