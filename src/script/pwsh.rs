//! PowerShell command-mode trap heuristic.
//!
//! `Test-Path $a -and Test-Path $b` parses as a single `Test-Path` call in
//! command mode, with `-and` and the rest handed over as arguments. Each
//! call has to be parenthesized. This is a line pattern, not a parser: it
//! only flags an unparenthesized pair on one line.

use crate::diagnostics::Diagnostic;
use regex::Regex;
use std::sync::LazyLock;

static TEST_PATH_AND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bTest-Path\b[^()\r\n]*?\s-and\s+Test-Path\b")
        .expect("Invalid Test-Path regex")
});

/// 1-based line numbers holding an unparenthesized `Test-Path` pair.
pub fn find_test_path_traps(script: &str) -> Vec<usize> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with('#'))
        .filter(|(_, line)| TEST_PATH_AND.is_match(line))
        .map(|(idx, _)| idx + 1)
        .collect()
}

pub fn check_pwsh_heuristics(script: &str, location: &str) -> Vec<Diagnostic> {
    find_test_path_traps(script)
        .into_iter()
        .map(|line| {
            Diagnostic::new(
                location,
                format!(
                    "line {}: unparenthesized 'Test-Path ... -and Test-Path' runs in command mode; \
                     wrap each call in parentheses",
                    line
                ),
            )
        })
        .collect()
}
