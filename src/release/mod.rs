//! Structural rules for the release pipeline document.
//!
//! Only the document whose file name matches `release.workflow_file` is
//! checked; every other document gets no diagnostics here. Each rule reports
//! independently, except where a missing root (the `on` section, the `jobs`
//! mapping, a required job) makes deeper checks meaningless.

mod jobs;
mod signing;
mod triggers;

#[cfg(test)]
mod tests;

use crate::config::ReleaseRules;
use crate::diagnostics::Diagnostic;
use crate::document::{Node, Workflow};
use std::path::Path;

pub use jobs::{REQUIRED_JOBS, REQUIRED_NEEDS, check_jobs};
pub use signing::{GATED_STEPS, SIGNING_GATE_EXPR, SIGNING_GATE_STEP_ID, is_gated};
pub use triggers::{RELEASE_TAG_GLOB, check_triggers};

/// Whether `path` names the release pipeline document.
pub fn is_release_document(path: &Path, rules: &ReleaseRules) -> bool {
    path.file_name()
        .is_some_and(|name| name == rules.workflow_file.as_str())
}

/// Run every release rule against `tree`. No-op for other documents.
pub fn validate_release(
    source: &str,
    path: &Path,
    tree: &Node,
    rules: &ReleaseRules,
) -> Vec<Diagnostic> {
    if !is_release_document(path, rules) {
        return Vec::new();
    }

    let workflow = Workflow::new(tree);
    let mut diagnostics = check_triggers(source, &workflow);
    diagnostics.extend(check_jobs(source, &workflow, rules));
    diagnostics
}
