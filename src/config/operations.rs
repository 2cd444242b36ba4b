//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, WfcheckError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = ".wfcheck.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(WfcheckError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            WfcheckError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config: an explicit path, else `.wfcheck.yaml`
    /// under `dir` if present, else defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let implicit = dir.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            return Self::load(implicit);
        }

        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            WfcheckError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `check_timeout_seconds` must be positive
    /// - `document_globs` must be non-empty and each must compile
    /// - `lint.command` must split into at least one word when lint is enabled
    /// - `release.workflow_file` must be non-empty
    /// - `release.required_targets` entries need both `os` and `target`
    pub fn validate(&self) -> Result<()> {
        if self.check_timeout_seconds == 0 {
            return Err(invalid("check_timeout_seconds must be greater than 0"));
        }

        if self.document_globs.is_empty() {
            return Err(invalid("document_globs must not be empty"));
        }
        self.document_globset()?;

        if self.lint.enabled {
            self.lint_argv()?;
        }

        if self.release.workflow_file.trim().is_empty() {
            return Err(invalid("release.workflow_file must not be empty"));
        }

        for target in &self.release.required_targets {
            if target.os.trim().is_empty() || target.target.trim().is_empty() {
                return Err(invalid(
                    "release.required_targets entries need both 'os' and 'target'",
                ));
            }
        }

        Ok(())
    }

    /// Timeout applied to each external tool invocation.
    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_seconds)
    }

    /// Compile `document_globs` into a matcher for file names.
    pub fn document_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.document_globs {
            let glob = Glob::new(pattern.trim()).map_err(|e| {
                invalid(&format!("invalid document glob '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| invalid(&format!("invalid document globs: {}", e)))
    }

    /// Split `lint.command` into program and leading arguments.
    pub fn lint_argv(&self) -> Result<Vec<String>> {
        let argv = shell_words::split(&self.lint.command).map_err(|e| {
            invalid(&format!(
                "failed to parse lint.command '{}': {}",
                self.lint.command, e
            ))
        })?;
        if argv.is_empty() {
            return Err(invalid("lint.command must not be empty"));
        }
        Ok(argv)
    }
}

fn invalid(reason: &str) -> WfcheckError {
    WfcheckError::UserError(format!("config validation failed: {}", reason))
}
