//! Document lint pass over the whole discovered set.
//!
//! The lint tool runs once with every document on its command line. Its
//! failure output becomes a single diagnostic. A lint tool that is not
//! installed is an environment limitation: it yields a warning, not a failure.

use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::process::{probe, run_tool};
use std::path::PathBuf;
use tracing::debug;

/// Diagnostics and warnings from one lint run.
#[derive(Debug, Default)]
pub struct LintOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub warnings: Vec<String>,
}

/// Lint `paths` with the configured command and relaxed rule set.
pub fn run_lint(config: &Config, paths: &[PathBuf]) -> LintOutcome {
    let mut outcome = LintOutcome::default();

    if !config.lint.enabled {
        debug!("document lint disabled");
        return outcome;
    }

    let argv = match config.lint_argv() {
        Ok(argv) => argv,
        Err(e) => {
            outcome.diagnostics.push(Diagnostic::new("lint", e.to_string()));
            return outcome;
        }
    };
    let (program, leading) = (&argv[0], &argv[1..]);

    if paths.is_empty() {
        outcome.diagnostics.push(Diagnostic::new(
            program.as_str(),
            "no workflow files were provided to lint",
        ));
        return outcome;
    }

    if !probe(program, leading, config.check_timeout()) {
        outcome
            .warnings
            .push(format!("{} is not installed; skipping document lint.", program));
        return outcome;
    }

    let mut args: Vec<String> = leading.to_vec();
    args.push("-d".to_string());
    args.push(config.lint.rules.clone());
    args.extend(paths.iter().map(|p| p.display().to_string()));

    match run_tool(program, &args, None, config.check_timeout()) {
        Ok(output) if output.timed_out => outcome.diagnostics.push(Diagnostic::new(
            program.as_str(),
            format!("timed out after {}s", config.check_timeout_seconds),
        )),
        Ok(output) if !output.is_success() => {
            let stdout = output.stdout.trim();
            let text = if stdout.is_empty() {
                output.stderr.trim()
            } else {
                stdout
            };
            outcome.diagnostics.push(Diagnostic::new(
                program.as_str(),
                format!("failed:\n{}", text),
            ));
        }
        Ok(_) => {}
        Err(e) => outcome
            .diagnostics
            .push(Diagnostic::new(program.as_str(), e.to_string())),
    }

    outcome
}
