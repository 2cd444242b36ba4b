//! Configuration model for wfcheck.
//!
//! This module defines the Config struct that represents `.wfcheck.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::CONFIG_FILE_NAME;
pub use types::{LintConfig, ReleaseRules, ReleaseTarget};
