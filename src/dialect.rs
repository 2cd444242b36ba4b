//! Interpreter dialect resolution for inline `run` scripts.
//!
//! Precedence, highest first:
//! 1. step `shell`
//! 2. job `defaults.run.shell`
//! 3. workflow `defaults.run.shell`
//! 4. inference from the job's runner labels, expanding matrix placeholders
//!
//! Inference is conservative: an unrecognized, interpolated, or mixed-OS
//! label set resolves to [`Dialect::Unknown`], which disables syntax checks.

use crate::document::{Job, Node, Step, Workflow};
use regex::Regex;
use std::sync::LazyLock;

/// A `runs-on` entry that is exactly one matrix key placeholder.
static MATRIX_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$\{\{\s*matrix\.([A-Za-z0-9_-]+)\s*\}\}$")
        .expect("Invalid matrix placeholder regex")
});

/// The interpreter a run-block executes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Bash,
    Pwsh,
    Unknown,
}

impl Dialect {
    /// Normalize an explicit `shell` value.
    pub fn from_shell(shell: &str) -> Self {
        let lowered = shell.to_lowercase();
        if lowered.contains("pwsh") || lowered.contains("powershell") {
            return Dialect::Pwsh;
        }
        let trimmed = lowered.trim();
        if trimmed == "bash" || trimmed == "sh" || lowered.contains("bash") {
            return Dialect::Bash;
        }
        Dialect::Unknown
    }

    /// Classify a single runner label.
    pub fn from_runner_label(label: &str) -> Self {
        if label.contains("${{") {
            return Dialect::Unknown;
        }
        let lowered = label.to_lowercase();
        if lowered.contains("windows") {
            Dialect::Pwsh
        } else if ["ubuntu", "linux", "macos"]
            .iter()
            .any(|os| lowered.contains(os))
        {
            Dialect::Bash
        } else {
            Dialect::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Pwsh => "pwsh",
            Dialect::Unknown => "unknown",
        }
    }
}

/// An inline script with its resolved dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunBlock<'a> {
    /// In-document path of the owning step, e.g. `jobs.build.steps[2]`.
    pub path: String,
    pub dialect: Dialect,
    pub script: &'a str,
}

/// Compute the effective dialect of a step's `run` script.
pub fn resolve_dialect(
    job: &Job<'_>,
    step: &Step<'_>,
    workflow_default_shell: Option<&str>,
) -> Dialect {
    if let Some(shell) = step
        .shell()
        .or_else(|| job.default_shell())
        .or(workflow_default_shell)
    {
        return Dialect::from_shell(shell);
    }
    infer_from_runner(job)
}

/// Infer a dialect from the job's effective runner labels.
pub fn infer_from_runner(job: &Job<'_>) -> Dialect {
    let Some(labels) = effective_runner_labels(job) else {
        return Dialect::Unknown;
    };

    let mut classes: Vec<Dialect> = Vec::new();
    for label in labels {
        let class = label.map_or(Dialect::Unknown, Dialect::from_runner_label);
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    match classes.as_slice() {
        [single] => *single,
        _ => Dialect::Unknown,
    }
}

/// Expand `runs-on` into concrete labels.
///
/// Returns `None` when `runs-on` is absent or not a string/list. A `None`
/// label inside the list marks a matrix placeholder that resolved to nothing.
pub fn effective_runner_labels<'a>(job: &Job<'a>) -> Option<Vec<Option<&'a str>>> {
    let runs_on = job.runs_on()?;
    let entries: Vec<&'a Node> = match runs_on {
        Node::Sequence(items) => items.iter().collect(),
        Node::Scalar(_) => vec![runs_on],
        _ => return None,
    };

    let mut labels = Vec::new();
    for entry in entries {
        let Some(text) = entry.as_str() else {
            labels.push(None);
            continue;
        };
        match MATRIX_PLACEHOLDER.captures(text) {
            Some(caps) => {
                let key = caps.get(1).map_or("", |m| m.as_str());
                let values = job.matrix().map(|m| m.values(key)).unwrap_or_default();
                if values.is_empty() {
                    labels.push(None);
                } else {
                    labels.extend(values.into_iter().map(Some));
                }
            }
            None => labels.push(Some(text)),
        }
    }
    Some(labels)
}

/// Every step with a string `run`, paired with its resolved dialect.
pub fn extract_run_blocks<'a>(workflow: &Workflow<'a>) -> Vec<RunBlock<'a>> {
    let workflow_shell = workflow.default_shell();
    let mut blocks = Vec::new();

    for job in workflow.jobs() {
        for step in job.steps() {
            let Some(script) = step.run() else {
                continue;
            };
            blocks.push(RunBlock {
                path: step.path(),
                dialect: resolve_dialect(&job, &step, workflow_shell),
                script,
            });
        }
    }
    blocks
}
