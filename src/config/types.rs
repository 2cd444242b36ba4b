//! Configuration types and defaults for wfcheck.
//!
//! This module defines the nested config sections and the default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};

/// Relaxed yamllint rule set applied to workflow documents.
pub const DEFAULT_LINT_RULES: &str = "{extends: default, rules: {\
line-length: {max: 200}, \
truthy: disable, \
comments-indentation: disable, \
document-start: disable, \
indentation: {indent-sequences: whatever}\
}}";

/// Document lint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Whether to run the lint tool at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lint command line; split with shell-words, documents appended.
    #[serde(default = "default_lint_command")]
    pub command: String,

    /// Inline rule configuration passed with `-d`.
    #[serde(default = "default_lint_rules")]
    pub rules: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_lint_command(),
            rules: default_lint_rules(),
        }
    }
}

/// One runner/target pair the release matrix must build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseTarget {
    pub os: String,
    pub target: String,
}

impl ReleaseTarget {
    pub fn new(os: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            target: target.into(),
        }
    }
}

impl std::fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.target)
    }
}

/// Structural rules for the release pipeline document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseRules {
    /// File name that identifies the release pipeline document.
    #[serde(default = "default_release_workflow_file")]
    pub workflow_file: String,

    /// Action reference prefix the publish job must use.
    #[serde(default = "default_upload_action")]
    pub upload_action: String,

    /// `(os, target)` pairs that `build_package`'s matrix must include.
    #[serde(default = "default_required_targets")]
    pub required_targets: Vec<ReleaseTarget>,
}

impl Default for ReleaseRules {
    fn default() -> Self {
        Self {
            workflow_file: default_release_workflow_file(),
            upload_action: default_upload_action(),
            required_targets: default_required_targets(),
        }
    }
}

// =========================================================================
// Default value functions
// =========================================================================

pub fn default_true() -> bool {
    true
}

pub fn default_paths() -> Vec<String> {
    vec![".github/workflows/release-gui.yml".to_string()]
}

pub fn default_document_globs() -> Vec<String> {
    vec!["*.yml".to_string(), "*.yaml".to_string()]
}

pub fn default_shell_program() -> String {
    "bash".to_string()
}

pub fn default_python_program() -> String {
    "python3".to_string()
}

pub fn default_check_timeout_seconds() -> u64 {
    30
}

pub fn default_lint_command() -> String {
    "yamllint".to_string()
}

pub fn default_lint_rules() -> String {
    DEFAULT_LINT_RULES.to_string()
}

pub fn default_release_workflow_file() -> String {
    "release-gui.yml".to_string()
}

pub fn default_upload_action() -> String {
    "softprops/action-gh-release".to_string()
}

pub fn default_required_targets() -> Vec<ReleaseTarget> {
    vec![
        ReleaseTarget::new("windows-latest", "x86_64-pc-windows-msvc"),
        ReleaseTarget::new("ubuntu-22.04", "x86_64-unknown-linux-gnu"),
        ReleaseTarget::new("macos-14", "aarch64-apple-darwin"),
    ]
}
