//! Tests for the release pipeline rules.

use super::*;
use crate::config::ReleaseRules;
use crate::document::parse;
use std::path::Path;

const SOURCE: &str = ".github/workflows/release-gui.yml";

const VALID_RELEASE: &str = r#"
name: release-gui
on:
  push:
    tags: ["v*"]
  workflow_dispatch:
    inputs:
      tag:
        required: false
jobs:
  resolve_tag:
    runs-on: ubuntu-22.04
    steps:
      - run: echo "tag=${GITHUB_REF_NAME}" >> "$GITHUB_OUTPUT"
  smoke:
    needs: resolve_tag
    runs-on: ubuntu-22.04
    steps:
      - run: cargo test
  build_package:
    needs: [resolve_tag, smoke]
    runs-on: ${{ matrix.os }}
    strategy:
      matrix:
        include:
          - os: windows-latest
            target: x86_64-pc-windows-msvc
          - os: ubuntu-22.04
            target: x86_64-unknown-linux-gnu
          - os: macos-14
            target: aarch64-apple-darwin
    steps:
      - uses: actions/checkout@v4
      - id: mac_signing
        shell: bash
        run: echo "enabled=true" >> "$GITHUB_OUTPUT"
      - name: Sign and notarize macOS app
        if: ${{ steps.mac_signing.outputs.enabled == 'true' }}
        run: ./sign.sh
      - name: Collect release assets
        if: ${{ always() && steps.mac_signing.outputs.enabled == 'true' }}
        run: python3 .github/scripts/release_gui_collect.py
      - name: Upload release assets
        if: ${{ steps.mac_signing.outputs.enabled=='true' }}
        uses: actions/upload-artifact@v4
  publish:
    needs: [resolve_tag, build_package]
    runs-on: ubuntu-22.04
    steps:
      - uses: softprops/action-gh-release@v2
"#;

fn run(text: &str) -> Vec<String> {
    let tree = parse(SOURCE, text).tree.expect("fixture parses");
    validate_release(SOURCE, Path::new(SOURCE), &tree, &ReleaseRules::default())
        .into_iter()
        .map(|d| d.to_string())
        .collect()
}

fn messages(text: &str) -> Vec<String> {
    let tree = parse(SOURCE, text).tree.expect("fixture parses");
    validate_release(SOURCE, Path::new(SOURCE), &tree, &ReleaseRules::default())
        .into_iter()
        .map(|d| d.message)
        .collect()
}

// =========================================================================
// Scope
// =========================================================================

#[test]
fn test_valid_release_document_passes() {
    assert_eq!(run(VALID_RELEASE), Vec::<String>::new());
}

#[test]
fn test_other_documents_are_ignored() {
    let tree = parse("ci.yml", "on: pull_request\njobs: {}\n").tree.unwrap();
    let diags = validate_release(
        "ci.yml",
        Path::new(".github/workflows/ci.yml"),
        &tree,
        &ReleaseRules::default(),
    );
    assert!(diags.is_empty());
}

#[test]
fn test_release_file_name_is_configurable() {
    let rules = ReleaseRules {
        workflow_file: "release.yml".to_string(),
        ..Default::default()
    };
    assert!(is_release_document(Path::new("a/b/release.yml"), &rules));
    assert!(!is_release_document(Path::new("a/b/release-gui.yml"), &rules));
}

// =========================================================================
// Triggers
// =========================================================================

#[test]
fn test_pull_request_trigger_is_rejected_and_jobs_still_checked() {
    let text = VALID_RELEASE
        .replace("on:\n", "on:\n  pull_request:\n")
        .replace("needs: [resolve_tag, build_package]", "needs: [resolve_tag]");
    let diags = run(&text);

    assert_eq!(
        diags,
        vec![
            format!("{SOURCE}:on.pull_request: release workflow must not define pull_request trigger"),
            format!("{SOURCE}:jobs.publish.needs: job 'publish' must depend on: build_package"),
        ]
    );
}

#[test]
fn test_missing_on_stops_trigger_checks() {
    let text = VALID_RELEASE.replace("on:\n", "triggers:\n");
    assert_eq!(messages(&text), vec!["expected 'on' to be a mapping"]);
}

#[test]
fn test_scalar_on_is_not_a_mapping() {
    let text = VALID_RELEASE.replacen(
        "on:\n  push:\n    tags: [\"v*\"]\n  workflow_dispatch:\n    inputs:\n      tag:\n        required: false\n",
        "on: push\n",
        1,
    );
    assert_eq!(messages(&text), vec!["expected 'on' to be a mapping"]);
}

#[test]
fn test_missing_push_and_dispatch_each_reported() {
    let text = VALID_RELEASE.replacen(
        "on:\n  push:\n    tags: [\"v*\"]\n  workflow_dispatch:\n    inputs:\n      tag:\n        required: false\n",
        "on:\n  schedule:\n    - cron: '0 0 * * *'\n",
        1,
    );
    assert_eq!(
        messages(&text),
        vec![
            "release workflow must define push tag trigger",
            "release workflow must define workflow_dispatch",
        ]
    );
}

#[test]
fn test_push_must_be_mapping() {
    let text = VALID_RELEASE.replace("  push:\n    tags: [\"v*\"]\n", "  push:\n");
    assert_eq!(
        messages(&text),
        vec!["release workflow push trigger must be a mapping"]
    );
}

#[test]
fn test_push_tags_must_include_release_glob() {
    let text = VALID_RELEASE.replace("tags: [\"v*\"]", "tags: [\"release-*\"]");
    assert_eq!(
        messages(&text),
        vec!["release workflow push.tags must include 'v*'"]
    );

    let text = VALID_RELEASE.replace("tags: [\"v*\"]", "branches: [main]");
    assert_eq!(
        messages(&text),
        vec!["release workflow push.tags must include 'v*'"]
    );
}

// =========================================================================
// Jobs
// =========================================================================

#[test]
fn test_missing_jobs_section() {
    let text = "on:\n  push:\n    tags: [v*]\n  workflow_dispatch:\n";
    assert_eq!(messages(text), vec!["expected 'jobs' to be a mapping"]);
}

#[test]
fn test_missing_required_jobs_reported_together() {
    let text = "on:\n  push:\n    tags: [v*]\n  workflow_dispatch:\njobs:\n  smoke:\n    runs-on: ubuntu-22.04\n";
    assert_eq!(
        messages(text),
        vec!["release workflow is missing required jobs: resolve_tag, build_package, publish"]
    );
}

#[test]
fn test_needs_checked_per_job() {
    let text = VALID_RELEASE
        .replace("    needs: resolve_tag\n", "")
        .replace("needs: [resolve_tag, smoke]", "needs: resolve_tag");
    assert_eq!(
        messages(&text),
        vec![
            "job 'smoke' must depend on: resolve_tag",
            "job 'build_package' must depend on: smoke",
        ]
    );
}

#[test]
fn test_missing_macos_target_is_named() {
    let text = VALID_RELEASE.replace(
        "          - os: macos-14\n            target: aarch64-apple-darwin\n",
        "",
    );
    assert_eq!(
        run(&text),
        vec![format!(
            "{SOURCE}:jobs.build_package.strategy.matrix.include: \
             build_package matrix is missing required targets: macos-14/aarch64-apple-darwin"
        )]
    );
}

#[test]
fn test_extra_matrix_targets_are_allowed() {
    let text = VALID_RELEASE.replace(
        "          - os: macos-14\n",
        "          - os: macos-13\n            target: x86_64-apple-darwin\n          - os: macos-14\n",
    );
    assert!(run(&text).is_empty());
}

#[test]
fn test_publish_must_use_release_action() {
    let text = VALID_RELEASE.replace(
        "softprops/action-gh-release@v2",
        "actions/upload-artifact@v4",
    );
    assert_eq!(
        messages(&text),
        vec!["publish job must use softprops/action-gh-release"]
    );
}

// =========================================================================
// Signing gate
// =========================================================================

#[test]
fn test_is_gated_normalizes_expression() {
    assert!(is_gated("steps.mac_signing.outputs.enabled == 'true'"));
    assert!(is_gated("${{ steps.mac_signing.outputs.enabled == 'true' }}"));
    assert!(is_gated("${{steps.mac_signing.outputs.enabled=='true'}}"));
    assert!(is_gated("always() && steps.mac_signing.outputs.enabled  ==  'true'"));
    assert!(!is_gated("steps.mac_signing.outputs.enabled != 'true'"));
    assert!(!is_gated("steps.mac_signing.outputs.enabled == 'false'"));
    assert!(!is_gated("runner.os == 'macOS'"));
}

#[test]
fn test_is_gated_accepts_gate_as_conjunct() {
    assert!(is_gated("${{ always() && steps.mac_signing.outputs.enabled == 'true' }}"));
    assert!(is_gated("(steps.mac_signing.outputs.enabled == 'true') && success()"));
    assert!(is_gated("always()&&(steps.mac_signing.outputs.enabled=='true')"));
    assert!(is_gated("(always() && steps.mac_signing.outputs.enabled == 'true')"));
}

#[test]
fn test_is_gated_rejects_negated_gate() {
    assert!(!is_gated("${{ !(steps.mac_signing.outputs.enabled == 'true') }}"));
    assert!(!is_gated("!steps.mac_signing.outputs.enabled == 'true'"));
    assert!(!is_gated("always() && !(steps.mac_signing.outputs.enabled == 'true')"));
}

#[test]
fn test_is_gated_rejects_disjunction() {
    assert!(!is_gated("${{ steps.mac_signing.outputs.enabled == 'true' || always() }}"));
    assert!(!is_gated("runner.os != 'macOS' || steps.mac_signing.outputs.enabled == 'true'"));
    assert!(!is_gated("always() && (steps.mac_signing.outputs.enabled == 'true' || true)"));
}

#[test]
fn test_is_gated_ignores_operators_inside_strings() {
    assert!(is_gated("github.ref != 'a||b' && steps.mac_signing.outputs.enabled == 'true'"));
}

#[test]
fn test_negated_gate_in_document_is_reported() {
    let text = VALID_RELEASE.replace(
        "if: ${{ steps.mac_signing.outputs.enabled == 'true' }}\n        run: ./sign.sh",
        "if: ${{ !(steps.mac_signing.outputs.enabled == 'true') }}\n        run: ./sign.sh",
    );
    assert_eq!(
        run(&text),
        vec![format!(
            "{SOURCE}:jobs.build_package.steps[2]: step 'Sign and notarize macOS app' \
             must be gated on steps.mac_signing.outputs.enabled == 'true'"
        )]
    );
}

#[test]
fn test_bypassed_gate_in_document_is_reported() {
    let text = VALID_RELEASE.replace(
        "if: ${{ steps.mac_signing.outputs.enabled=='true' }}",
        "if: ${{ steps.mac_signing.outputs.enabled == 'true' || always() }}",
    );
    assert_eq!(
        run(&text),
        vec![format!(
            "{SOURCE}:jobs.build_package.steps[4]: step 'Upload release assets' \
             must be gated on steps.mac_signing.outputs.enabled == 'true'"
        )]
    );
}

#[test]
fn test_missing_gate_step() {
    let text = VALID_RELEASE.replace("id: mac_signing", "id: signing_probe");
    assert_eq!(
        messages(&text),
        vec!["build_package must define a step with id 'mac_signing'"]
    );
}

#[test]
fn test_each_gated_step_checked_independently() {
    let text = VALID_RELEASE
        .replace(
            "if: ${{ steps.mac_signing.outputs.enabled == 'true' }}\n",
            "if: runner.os == 'macOS'\n",
        )
        .replace(
            "- name: Collect release assets\n        if: ${{ always() && steps.mac_signing.outputs.enabled == 'true' }}\n",
            "- name: Collect release assets\n",
        );
    let diags = run(&text);

    assert_eq!(
        diags,
        vec![
            format!(
                "{SOURCE}:jobs.build_package.steps[2]: step 'Sign and notarize macOS app' \
                 must be gated on steps.mac_signing.outputs.enabled == 'true'"
            ),
            format!(
                "{SOURCE}:jobs.build_package.steps[3]: step 'Collect release assets' \
                 must be gated on steps.mac_signing.outputs.enabled == 'true'"
            ),
        ]
    );
}

#[test]
fn test_missing_gated_step_reported_by_name() {
    let text = VALID_RELEASE.replace("name: Upload release assets", "name: Upload assets");
    assert_eq!(
        messages(&text),
        vec!["build_package is missing step 'Upload release assets'"]
    );
}

#[test]
fn test_validation_is_deterministic() {
    let text = VALID_RELEASE.replace("id: mac_signing", "id: x").replace("v*", "x*");
    assert_eq!(run(&text), run(&text));
    assert_eq!(run(&text).len(), 2);
}

#[test]
fn test_required_tables_match_pipeline_contract() {
    assert_eq!(REQUIRED_JOBS, ["resolve_tag", "smoke", "build_package", "publish"]);
    assert_eq!(REQUIRED_NEEDS.len(), 3);
    assert_eq!(SIGNING_GATE_STEP_ID, "mac_signing");
    assert_eq!(GATED_STEPS.len(), 3);
    assert_eq!(RELEASE_TAG_GLOB, "v*");
}
