//! macOS signing gate wiring inside `build_package`.

use crate::diagnostics::{Diagnostic, locate};
use crate::document::Job;

/// Step id whose `enabled` output turns signing on.
pub const SIGNING_GATE_STEP_ID: &str = "mac_signing";

/// Condition every gated step must test.
pub const SIGNING_GATE_EXPR: &str = "steps.mac_signing.outputs.enabled == 'true'";

/// Step names that must carry the gate condition.
pub const GATED_STEPS: [&str; 3] = [
    "Sign and notarize macOS app",
    "Collect release assets",
    "Upload release assets",
];

/// Whether an `if` expression tests the signing gate.
///
/// `${{ }}` wrapping is dropped and whitespace normalized, so
/// `${{steps.mac_signing.outputs.enabled=='true'}}` also passes. The gate
/// may be one top-level `&&` clause of a larger expression. A top-level `||`
/// or a negated gate never passes.
pub fn is_gated(condition: &str) -> bool {
    let trimmed = condition.trim();
    let inner = trimmed
        .strip_prefix("${{")
        .and_then(|s| s.strip_suffix("}}"))
        .unwrap_or(trimmed);
    let normalized = inner
        .replace("==", " == ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let expr = strip_outer_parens(&normalized);

    if split_top_level(expr, "||").len() > 1 {
        return false;
    }
    split_top_level(expr, "&&")
        .into_iter()
        .any(|clause| strip_outer_parens(clause) == SIGNING_GATE_EXPR)
}

/// Split on `op` outside parentheses and quoted strings.
fn split_top_level<'a>(expr: &'a str, op: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    let mut chars = expr.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => depth = depth.saturating_sub(1),
            _ if !quoted && depth == 0 && expr[i..].starts_with(op) => {
                parts.push(expr[start..i].trim());
                start = i + op.len();
                for _ in 1..op.len() {
                    chars.next();
                }
            }
            _ => {}
        }
    }
    parts.push(expr[start..].trim());
    parts
}

/// Drop parentheses that wrap the whole expression.
fn strip_outer_parens(expr: &str) -> &str {
    let mut expr = expr.trim();
    while expr.starts_with('(') && closing_paren(expr) == Some(expr.len() - 1) {
        expr = expr[1..expr.len() - 1].trim();
    }
    expr
}

/// Byte index of the `)` matching a leading `(`.
fn closing_paren(expr: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quoted = false;
    for (i, c) in expr.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Check the gate step and every gated step, each on its own.
pub fn check_signing_gate(source: &str, job: &Job<'_>) -> Vec<Diagnostic> {
    let steps = job.steps();
    let steps_location = locate(source, &format!("{}.steps", job.path()));
    let mut diagnostics = Vec::new();

    if !steps.iter().any(|s| s.id() == Some(SIGNING_GATE_STEP_ID)) {
        diagnostics.push(Diagnostic::new(
            steps_location.clone(),
            format!(
                "{} must define a step with id '{}'",
                job.id, SIGNING_GATE_STEP_ID
            ),
        ));
    }

    for name in GATED_STEPS {
        let Some(step) = steps.iter().find(|s| s.name() == Some(name)) else {
            diagnostics.push(Diagnostic::new(
                steps_location.clone(),
                format!("{} is missing step '{}'", job.id, name),
            ));
            continue;
        };

        if !step.condition().is_some_and(is_gated) {
            diagnostics.push(Diagnostic::new(
                locate(source, &step.path()),
                format!("step '{}' must be gated on {}", name, SIGNING_GATE_EXPR),
            ));
        }
    }

    diagnostics
}
