//! Trigger shape of the release pipeline.

use crate::diagnostics::{Diagnostic, locate};
use crate::document::{Node, Workflow};

/// Tag glob the push trigger must include.
pub const RELEASE_TAG_GLOB: &str = "v*";

/// Check the `on` section.
///
/// A missing or non-mapping `on` is reported once and nothing else is
/// checked; the remaining clauses each report on their own.
pub fn check_triggers(source: &str, workflow: &Workflow<'_>) -> Vec<Diagnostic> {
    let Some(on) = workflow.on().filter(|node| node.is_mapping()) else {
        return vec![Diagnostic::new(
            locate(source, "on"),
            "expected 'on' to be a mapping",
        )];
    };

    let mut diagnostics = Vec::new();

    if on.contains_key("pull_request") {
        diagnostics.push(Diagnostic::new(
            locate(source, "on.pull_request"),
            "release workflow must not define pull_request trigger",
        ));
    }

    match on.get("push") {
        None => diagnostics.push(Diagnostic::new(
            locate(source, "on"),
            "release workflow must define push tag trigger",
        )),
        Some(push) if !push.is_mapping() => diagnostics.push(Diagnostic::new(
            locate(source, "on.push"),
            "release workflow push trigger must be a mapping",
        )),
        Some(push) => {
            let has_glob = push
                .get("tags")
                .and_then(Node::as_sequence)
                .is_some_and(|tags| tags.iter().any(|t| t.as_str() == Some(RELEASE_TAG_GLOB)));
            if !has_glob {
                diagnostics.push(Diagnostic::new(
                    locate(source, "on.push.tags"),
                    format!("release workflow push.tags must include '{}'", RELEASE_TAG_GLOB),
                ));
            }
        }
    }

    if !on.contains_key("workflow_dispatch") {
        diagnostics.push(Diagnostic::new(
            locate(source, "on"),
            "release workflow must define workflow_dispatch",
        ));
    }

    diagnostics
}
