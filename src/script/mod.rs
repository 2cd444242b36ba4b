//! Static checks for inline `run` scripts.
//!
//! - `bash`: parse-only syntax check through the shell, with `${{ }}`
//!   templating replaced by an opaque token first
//! - `bash` and `pwsh`: `python -c` snippets are compiled by the snippet compiler
//! - `pwsh`: line heuristic for unparenthesized `Test-Path ... -and Test-Path`
//! - `unknown`: nothing is checked
//!
//! External checkers are reached through the [`Toolchain`] built once per
//! run. A checker that is unavailable simply skips its check.

mod bash;
mod pwsh;
mod python;
mod tool;


pub use bash::{EXPR_PLACEHOLDER, check_bash_syntax, sanitize_templating};
pub use pwsh::{check_pwsh_heuristics, find_test_path_traps};
pub use python::{check_python_snippets, extract_python_snippets};
pub use tool::{ProcessTool, SyntaxTool, Toolchain, Verdict};

use crate::diagnostics::Diagnostic;
use crate::dialect::Dialect;
use crate::error::WfcheckError;

/// Run every check that applies to `dialect` against one script body.
pub fn check_script(
    tools: &Toolchain,
    dialect: Dialect,
    script: &str,
    location: &str,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    match dialect {
        Dialect::Unknown => return diagnostics,
        Dialect::Bash => {
            if let Some(shell) = tools.shell() {
                diagnostics.extend(check_bash_syntax(shell, script, location));
            }
        }
        Dialect::Pwsh => diagnostics.extend(check_pwsh_heuristics(script, location)),
    }

    if let Some(python) = tools.python() {
        diagnostics.extend(check_python_snippets(python, script, location));
    }

    diagnostics
}

/// Diagnostic for a checker that could not be run on a block.
fn tool_failure(tool: &dyn SyntaxTool, location: &str, err: &WfcheckError) -> Diagnostic {
    tracing::warn!(tool = tool.name(), location, error = %err, "external checker failed");
    Diagnostic::new(location, format!("could not run {}: {}", tool.name(), err))
}
