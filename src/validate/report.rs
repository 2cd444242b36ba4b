//! Aggregated results of a validation run.

use crate::diagnostics::Diagnostic;
use serde::Serialize;

/// Diagnostics for one document, in the order they were found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Diagnostics from the document lint pass.
    pub lint: Vec<Diagnostic>,
    /// Per-document results in discovery order.
    pub documents: Vec<DocumentReport>,
    /// Non-fatal environment limitations.
    pub warnings: Vec<String>,
}

impl Report {
    /// Lint diagnostics first, then each document's in discovery order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lint
            .iter()
            .chain(self.documents.iter().flat_map(|doc| doc.diagnostics.iter()))
    }

    pub fn problem_count(&self) -> usize {
        self.diagnostics().count()
    }

    pub fn passed(&self) -> bool {
        self.problem_count() == 0
    }

    /// The failure listing, one bullet per diagnostic.
    ///
    /// ```text
    /// Workflow validation failed:
    /// - .github/workflows/release-gui.yml:on: expected 'on' to be a mapping
    /// ```
    pub fn format_failure(&self) -> String {
        let mut msg = String::from("Workflow validation failed:\n");
        for diagnostic in self.diagnostics() {
            msg.push_str(&format!("- {}\n", diagnostic));
        }
        msg
    }

    /// The success line.
    pub fn format_success(&self) -> String {
        format!(
            "Workflow validation passed for {} file(s).",
            self.documents.len()
        )
    }
}
