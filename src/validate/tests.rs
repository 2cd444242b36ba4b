//! Tests for discovery and the validation driver.

use super::*;
use crate::config::Config;
use crate::script::Toolchain;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =========================================================================
// Helper functions
// =========================================================================

fn no_lint_config() -> Config {
    let mut config = Config::default();
    config.lint.enabled = false;
    config
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const PWSH_WORKFLOW: &str = r#"
on: push
jobs:
  windows:
    runs-on: windows-latest
    steps:
      - run: |
          $a = "one"
          $b = "two"
          Write-Host $a
          Write-Host $b
          if (Test-Path $a -and Test-Path $b) { exit 1 }
      - run: |
          if ((Test-Path $a) -and (Test-Path $b)) { exit 1 }
"#;

// =========================================================================
// Discovery
// =========================================================================

#[test]
fn test_directory_expands_to_sorted_documents() {
    let temp = TempDir::new().unwrap();
    write(&temp, "b.yml", "on: push\n");
    write(&temp, "a.yaml", "on: push\n");
    write(&temp, "notes.md", "# notes\n");
    fs::create_dir(temp.path().join("nested.yml")).unwrap();

    let globs = Config::default().document_globset().unwrap();
    let found = discover_documents(&[temp.path().to_path_buf()], &globs).unwrap();

    assert_eq!(
        found,
        vec![temp.path().join("a.yaml"), temp.path().join("b.yml")]
    );
}

#[test]
fn test_duplicates_are_removed_keeping_first() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "ci.yml", "on: push\n");

    let globs = Config::default().document_globset().unwrap();
    let found = discover_documents(
        &[file.clone(), temp.path().to_path_buf(), file.clone()],
        &globs,
    )
    .unwrap();

    assert_eq!(found, vec![file]);
}

#[test]
fn test_missing_file_is_kept_for_the_loader() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.yml");

    let globs = Config::default().document_globset().unwrap();
    let found = discover_documents(std::slice::from_ref(&missing), &globs).unwrap();

    assert_eq!(found, vec![missing]);
}

#[test]
fn test_empty_directory_discovers_nothing() {
    let temp = TempDir::new().unwrap();
    let globs = Config::default().document_globset().unwrap();
    let found = discover_documents(&[temp.path().to_path_buf()], &globs).unwrap();
    assert!(found.is_empty());
}

// =========================================================================
// Driver
// =========================================================================

#[test]
fn test_clean_document_passes() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "ci.yml",
        "on: push\njobs:\n  a:\n    runs-on: ubuntu-22.04\n    steps:\n      - run: echo hi\n",
    );

    let report = validate_all(&[path], &no_lint_config(), &Toolchain::none());

    assert!(report.passed());
    assert_eq!(report.format_success(), "Workflow validation passed for 1 file(s).");
}

#[test]
fn test_bad_document_does_not_stop_siblings() {
    let temp = TempDir::new().unwrap();
    let broken = write(&temp, "broken.yml", "jobs: [oops\n");
    let pwsh = write(&temp, "windows.yml", PWSH_WORKFLOW);
    let missing = temp.path().join("missing.yml");

    let report = validate_all(
        &[broken.clone(), missing.clone(), pwsh.clone()],
        &no_lint_config(),
        &Toolchain::none(),
    );

    assert_eq!(report.documents.len(), 3);
    assert_eq!(report.documents[0].diagnostics.len(), 1);
    assert!(report.documents[0].diagnostics[0].message.starts_with("YAML parse error"));
    assert_eq!(report.documents[1].diagnostics[0].message, "file does not exist");

    let pwsh_diags = &report.documents[2].diagnostics;
    assert_eq!(pwsh_diags.len(), 1);
    assert_eq!(
        pwsh_diags[0].location,
        format!("{}:jobs.windows.steps[0]", pwsh.display())
    );
    assert!(pwsh_diags[0].message.starts_with("line 5:"));
    assert_eq!(report.problem_count(), 3);
}

#[test]
fn test_release_rules_only_apply_to_release_document() {
    let temp = TempDir::new().unwrap();
    let ci = write(&temp, "ci.yml", "on:\n  pull_request:\njobs: {}\n");
    let release = write(&temp, "release-gui.yml", "on:\n  pull_request:\njobs: {}\n");

    let report = validate_all(&[ci, release], &no_lint_config(), &Toolchain::none());

    assert!(report.documents[0].passed());
    let messages: Vec<&str> = report.documents[1]
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "release workflow must not define pull_request trigger",
            "release workflow must define push tag trigger",
            "release workflow must define workflow_dispatch",
            "release workflow is missing required jobs: resolve_tag, smoke, build_package, publish",
        ]
    );
}

#[test]
fn test_failure_listing_has_one_bullet_per_diagnostic() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone.yml");

    let report = validate_all(
        std::slice::from_ref(&missing),
        &no_lint_config(),
        &Toolchain::none(),
    );

    assert_eq!(
        report.format_failure(),
        format!(
            "Workflow validation failed:\n- {}: file does not exist\n",
            missing.display()
        )
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp = TempDir::new().unwrap();
    let pwsh = write(&temp, "windows.yml", PWSH_WORKFLOW);
    let release = write(&temp, "release-gui.yml", "on: push\njobs: {}\n");
    let paths = vec![release, pwsh];

    let first = validate_all(&paths, &no_lint_config(), &Toolchain::none());
    let second = validate_all(&paths, &no_lint_config(), &Toolchain::none());

    let first: Vec<_> = first.diagnostics().cloned().collect();
    let second: Vec<_> = second.diagnostics().cloned().collect();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_report_serializes_to_json() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone.yml");
    let mut report = validate_all(&[missing], &no_lint_config(), &Toolchain::none());
    report.warnings.push("bash is unavailable; skipping bash syntax checks.".to_string());

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["documents"][0]["diagnostics"][0]["message"], "file does not exist");
    assert_eq!(json["warnings"][0], "bash is unavailable; skipping bash syntax checks.");
    assert!(json["lint"].as_array().unwrap().is_empty());
}
