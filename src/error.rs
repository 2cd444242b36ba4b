//! Error types for the wfcheck CLI.
//!
//! Uses thiserror for derive macros. Defects found in workflow documents are
//! never errors: they travel as [`crate::diagnostics::Diagnostic`] values. The
//! variants here only describe why a whole run could not succeed.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for wfcheck operations.
#[derive(Error, Debug)]
pub enum WfcheckError {
    /// User provided invalid arguments or an unusable config file.
    #[error("{0}")]
    UserError(String),

    /// Failed to read or write something the tool itself needs.
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation ran to completion and produced diagnostics.
    #[error("workflow validation failed with {0} problem(s)")]
    ValidationFailed(usize),

    /// Discovery produced no documents.
    #[error("No workflow files found to validate.")]
    NoInput,
}

impl WfcheckError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WfcheckError::UserError(_) => exit_codes::USER_ERROR,
            WfcheckError::Io(_) => exit_codes::USER_ERROR,
            WfcheckError::ValidationFailed(_) => exit_codes::VALIDATION_FAILURE,
            WfcheckError::NoInput => exit_codes::NO_INPUT,
        }
    }

    /// Line to print on stderr before exiting, if any.
    ///
    /// A failed validation has already printed its report, and the no-input
    /// notice is printed as is.
    pub fn stderr_line(&self) -> Option<String> {
        match self {
            WfcheckError::ValidationFailed(_) => None,
            WfcheckError::NoInput => Some(self.to_string()),
            _ => Some(format!("Error: {}", self)),
        }
    }
}

/// Result type alias for wfcheck operations.
pub type Result<T> = std::result::Result<T, WfcheckError>;
