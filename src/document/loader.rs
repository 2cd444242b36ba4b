//! Soft-failing document loader.
//!
//! Every failure mode produces exactly one diagnostic and no tree. Callers
//! stop further checks for that document only.

use super::node::Node;
use crate::diagnostics::Diagnostic;
use std::path::Path;

/// Outcome of loading one document.
#[derive(Debug)]
pub struct Loaded {
    /// The parsed tree; `None` when the document cannot be checked further.
    pub tree: Option<Node>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Loaded {
    fn ok(tree: Node) -> Self {
        Self {
            tree: Some(tree),
            diagnostics: Vec::new(),
        }
    }

    fn fail(source: &str, message: impl Into<String>) -> Self {
        Self {
            tree: None,
            diagnostics: vec![Diagnostic::new(source, message)],
        }
    }
}

/// Read and parse a workflow document from disk.
pub fn load(path: &Path) -> Loaded {
    let source = path.display().to_string();

    if !path.exists() {
        return Loaded::fail(&source, "file does not exist");
    }

    match std::fs::read_to_string(path) {
        Ok(text) => parse(&source, &text),
        Err(e) => Loaded::fail(&source, format!("failed to read file: {}", e)),
    }
}

/// Parse document text attributed to `source`.
pub fn parse(source: &str, text: &str) -> Loaded {
    let value: serde_yaml::Value = match serde_yaml::from_str(text) {
        Ok(value) => value,
        Err(e) => return Loaded::fail(source, format!("YAML parse error: {}", e)),
    };

    let tree = Node::from(value);
    if !tree.is_mapping() {
        return Loaded::fail(source, "expected mapping at root");
    }

    Loaded::ok(tree)
}
