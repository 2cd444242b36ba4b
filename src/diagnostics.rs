//! Diagnostic values shared by every checker.
//!
//! A diagnostic is a location plus a message. Locations are
//! `<source>` or `<source>:<dotted.path[index]>`. Checkers only ever append.

use serde::Serialize;
use std::fmt;

/// A single reported defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source identity, optionally followed by `:` and a path into the document.
    pub location: String,
    /// Human-readable description; may span several lines for tool output.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Join a source identity and an in-document path into a location string.
pub fn locate(source: &str, path: &str) -> String {
    if path.is_empty() {
        source.to_string()
    } else {
        format!("{}:{}", source, path)
    }
}
