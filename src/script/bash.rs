//! Parse-only shell syntax check.

use super::tool::{SyntaxTool, Verdict};
use super::tool_failure;
use crate::diagnostics::Diagnostic;
use regex::Regex;
use std::sync::LazyLock;

/// Token substituted for each `${{ ... }}` expression before checking.
pub const EXPR_PLACEHOLDER: &str = "GHA_EXPR";

static TEMPLATE_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\{\{.*?\}\}").expect("Invalid template expression regex"));

/// Replace every templating expression with [`EXPR_PLACEHOLDER`].
pub fn sanitize_templating(script: &str) -> String {
    TEMPLATE_EXPR
        .replace_all(script, EXPR_PLACEHOLDER)
        .into_owned()
}

/// Ask the shell to parse the sanitized script.
pub fn check_bash_syntax(shell: &dyn SyntaxTool, script: &str, location: &str) -> Vec<Diagnostic> {
    match shell.check(&sanitize_templating(script)) {
        Ok(Verdict::Clean) => Vec::new(),
        Ok(Verdict::Rejected(detail)) => vec![Diagnostic::new(
            location,
            format!("bash syntax error:\n{}", detail),
        )],
        Err(e) => vec![tool_failure(shell, location, &e)],
    }
}
