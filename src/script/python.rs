//! `python -c '<code>'` snippet extraction and compile check.
//!
//! Only single- or double-quoted arguments directly after `-c` are found.
//! Escaped quotes inside the code end the match early; that is accepted.

use super::tool::{SyntaxTool, Verdict};
use super::tool_failure;
use crate::diagnostics::Diagnostic;
use regex::Regex;
use std::sync::LazyLock;

static PYTHON_C: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\bpython3?\s+-c\s+(?:'([^']*)'|"([^"]*)")"#)
        .expect("Invalid python -c regex")
});

/// Every `python -c` code argument in `script`, in order.
pub fn extract_python_snippets(script: &str) -> Vec<&str> {
    PYTHON_C
        .captures_iter(script)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .collect()
}

/// Compile each snippet; one diagnostic per snippet that fails.
pub fn check_python_snippets(
    compiler: &dyn SyntaxTool,
    script: &str,
    location: &str,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for code in extract_python_snippets(script) {
        match compiler.check(code) {
            Ok(Verdict::Clean) => {}
            Ok(Verdict::Rejected(detail)) => diagnostics.push(Diagnostic::new(
                location,
                format!("invalid python -c snippet: {}", detail),
            )),
            Err(e) => diagnostics.push(tool_failure(compiler, location, &e)),
        }
    }

    diagnostics
}
