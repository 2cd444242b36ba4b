//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a wfcheck run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Discovery
    // =========================================================================
    /// Paths validated when no path arguments are given.
    #[serde(default = "default_paths")]
    pub default_paths: Vec<String>,

    /// File name globs a directory argument expands to.
    #[serde(default = "default_document_globs")]
    pub document_globs: Vec<String>,

    // =========================================================================
    // External checkers
    // =========================================================================
    /// Shell used for parse-only syntax checks of bash run-blocks.
    #[serde(default = "default_shell_program")]
    pub shell_program: String,

    /// Interpreter used to compile `python -c` snippets.
    #[serde(default = "default_python_program")]
    pub python_program: String,

    /// Upper bound on any single external tool invocation.
    #[serde(default = "default_check_timeout_seconds")]
    pub check_timeout_seconds: u64,

    /// Document lint settings.
    #[serde(default)]
    pub lint: LintConfig,

    // =========================================================================
    // Release pipeline rules
    // =========================================================================
    #[serde(default)]
    pub release: ReleaseRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_paths: default_paths(),
            document_globs: default_document_globs(),
            shell_program: default_shell_program(),
            python_program: default_python_program(),
            check_timeout_seconds: default_check_timeout_seconds(),
            lint: LintConfig::default(),
            release: ReleaseRules::default(),
        }
    }
}
