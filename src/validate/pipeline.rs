//! Per-document validation pass and the run over all documents.

use super::report::{DocumentReport, Report};
use crate::config::Config;
use crate::diagnostics::locate;
use crate::dialect::extract_run_blocks;
use crate::document::{Workflow, load};
use crate::lint::run_lint;
use crate::release::validate_release;
use crate::script::{Toolchain, check_script};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate one document start to finish.
///
/// A document that fails to load stops after the loader's diagnostic.
pub fn validate_document(path: &Path, config: &Config, tools: &Toolchain) -> DocumentReport {
    let source = path.display().to_string();
    let loaded = load(path);
    let mut diagnostics = loaded.diagnostics;

    let Some(tree) = loaded.tree else {
        debug!(document = %source, "document not loaded; skipping checks");
        return DocumentReport {
            path: source,
            diagnostics,
        };
    };

    diagnostics.extend(validate_release(&source, path, &tree, &config.release));

    let workflow = Workflow::new(&tree);
    for block in extract_run_blocks(&workflow) {
        debug!(
            document = %source,
            block = %block.path,
            dialect = block.dialect.as_str(),
            "checking run block"
        );
        let location = locate(&source, &block.path);
        diagnostics.extend(check_script(tools, block.dialect, block.script, &location));
    }

    DocumentReport {
        path: source,
        diagnostics,
    }
}

/// Lint the whole set, then validate each document in order.
pub fn validate_all(paths: &[PathBuf], config: &Config, tools: &Toolchain) -> Report {
    let mut report = Report {
        warnings: tools.warnings().to_vec(),
        ..Default::default()
    };

    let lint = run_lint(config, paths);
    report.lint = lint.diagnostics;
    report.warnings.extend(lint.warnings);

    for path in paths {
        report.documents.push(validate_document(path, config, tools));
    }

    report
}
