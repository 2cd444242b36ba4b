//! Exit code constants for the wfcheck CLI.
//!
//! - 0: Every document passed
//! - 1: One or more diagnostics were produced
//! - 2: No input documents were discovered, or the invocation itself was bad

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Validation failure: at least one diagnostic across all documents and the lint run.
pub const VALIDATION_FAILURE: i32 = 1;

/// Nothing to validate: no documents were discovered.
pub const NO_INPUT: i32 = 2;

/// Bad invocation or unusable config. Shares its value with clap's own usage errors.
pub const USER_ERROR: i32 = 2;
