//! Input document discovery.

use crate::error::{Result, WfcheckError};
use globset::GlobSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expand path arguments into the ordered list of documents to validate.
///
/// - A directory expands to its files whose names match `globs`, sorted.
/// - Anything else is kept as given, so a missing file is reported by the loader.
/// - Duplicates (by canonical path) keep their first occurrence.
pub fn discover_documents(inputs: &[PathBuf], globs: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(documents_in_dir(input, globs)?);
        } else {
            paths.push(input.clone());
        }
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for path in paths {
        let identity = path.canonicalize().unwrap_or_else(|_| path.clone());
        if seen.insert(identity) {
            unique.push(path);
        }
    }
    Ok(unique)
}

fn documents_in_dir(dir: &Path, globs: &GlobSet) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        WfcheckError::Io(format!("failed to read directory '{}': {}", dir.display(), e))
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            WfcheckError::Io(format!("failed to read directory '{}': {}", dir.display(), e))
        })?;
        let path = entry.path();
        let matches = path
            .file_name()
            .is_some_and(|name| globs.is_match(Path::new(name)));
        if matches && path.is_file() {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}
