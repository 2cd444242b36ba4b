//! Job set, dependency wiring, matrix coverage, and publish action.

use super::signing::check_signing_gate;
use crate::config::{ReleaseRules, ReleaseTarget};
use crate::diagnostics::{Diagnostic, locate};
use crate::document::{Job, Node, Workflow};

/// Jobs the release pipeline must define.
pub const REQUIRED_JOBS: [&str; 4] = ["resolve_tag", "smoke", "build_package", "publish"];

/// `(job, dependencies it must list in needs)`.
pub const REQUIRED_NEEDS: [(&str, &[&str]); 3] = [
    ("smoke", &["resolve_tag"]),
    ("build_package", &["resolve_tag", "smoke"]),
    ("publish", &["resolve_tag", "build_package"]),
];

/// Check the `jobs` section.
///
/// Missing required jobs are reported together and stop deeper checks.
pub fn check_jobs(source: &str, workflow: &Workflow<'_>, rules: &ReleaseRules) -> Vec<Diagnostic> {
    if !workflow.jobs_node().is_some_and(Node::is_mapping) {
        return vec![Diagnostic::new(
            locate(source, "jobs"),
            "expected 'jobs' to be a mapping",
        )];
    }

    let missing: Vec<&str> = REQUIRED_JOBS
        .iter()
        .copied()
        .filter(|id| workflow.job(id).is_none())
        .collect();
    if !missing.is_empty() {
        return vec![Diagnostic::new(
            locate(source, "jobs"),
            format!("release workflow is missing required jobs: {}", missing.join(", ")),
        )];
    }

    let mut diagnostics = Vec::new();

    for (id, deps) in REQUIRED_NEEDS {
        if let Some(job) = workflow.job(id) {
            diagnostics.extend(check_needs(source, &job, deps));
        }
    }

    if let Some(build) = workflow.job("build_package") {
        diagnostics.extend(check_matrix_targets(source, &build, &rules.required_targets));
        diagnostics.extend(check_signing_gate(source, &build));
    }

    if let Some(publish) = workflow.job("publish") {
        diagnostics.extend(check_publish_action(source, &publish, &rules.upload_action));
    }

    diagnostics
}

fn check_needs(source: &str, job: &Job<'_>, deps: &[&str]) -> Option<Diagnostic> {
    let needs = job.needs();
    let missing: Vec<&str> = deps
        .iter()
        .copied()
        .filter(|dep| !needs.contains(dep))
        .collect();

    if missing.is_empty() {
        return None;
    }
    Some(Diagnostic::new(
        locate(source, &format!("{}.needs", job.path())),
        format!("job '{}' must depend on: {}", job.id, missing.join(", ")),
    ))
}

/// `(os, target)` pairs from the matrix `include` entries.
pub fn matrix_targets(job: &Job<'_>) -> Vec<ReleaseTarget> {
    let Some(matrix) = job.matrix() else {
        return Vec::new();
    };
    matrix
        .include()
        .into_iter()
        .filter_map(|entry| {
            let os = entry.get("os").and_then(Node::as_str)?;
            let target = entry.get("target").and_then(Node::as_str)?;
            Some(ReleaseTarget::new(os, target))
        })
        .collect()
}

fn check_matrix_targets(
    source: &str,
    job: &Job<'_>,
    required: &[ReleaseTarget],
) -> Option<Diagnostic> {
    let present = matrix_targets(job);
    let missing: Vec<String> = required
        .iter()
        .filter(|target| !present.contains(target))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        return None;
    }
    Some(Diagnostic::new(
        locate(source, &format!("{}.strategy.matrix.include", job.path())),
        format!(
            "{} matrix is missing required targets: {}",
            job.id,
            missing.join(", ")
        ),
    ))
}

fn check_publish_action(source: &str, job: &Job<'_>, action: &str) -> Option<Diagnostic> {
    let uses_action = job
        .steps()
        .iter()
        .any(|step| step.uses().is_some_and(|uses| uses.starts_with(action)));

    if uses_action {
        return None;
    }
    Some(Diagnostic::new(
        locate(source, &format!("{}.steps", job.path())),
        format!("{} job must use {}", job.id, action),
    ))
}
