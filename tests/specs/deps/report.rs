//! Dependency report specs
//!
//! `px deps` runs analyze + resolve against the host pip and prints the
//! report without executing anything.

use similar_asserts::assert_eq;

use crate::prelude::*;

#[test]
fn builtin_only_source_needs_nothing() {
    let temp = Project::empty();

    temp.px()
        .args(&["deps", "-c", "import os, json"])
        .passes()
        .stdout_has("No external packages required.");
}

#[test]
fn aliased_import_reports_the_installable_package() {
    let temp = Project::empty();

    let out = temp.px().args(&["deps", "-c", "import PIL"]).passes();

    assert_eq!(
        out.stdout().trim_end(),
        "Required packages: pillow (import PIL)\nMissing packages: pillow (import PIL)"
    );
}

#[test]
fn installed_packages_show_their_version() {
    let temp = Project::empty();
    temp.preinstall("numpy", "1.24.0");

    temp.px()
        .args(&["deps", "-c", "import numpy"])
        .passes()
        .stdout_has("Installed packages: numpy==1.24.0")
        .stdout_lacks("Missing packages");
}

#[test]
fn registry_names_match_case_insensitively() {
    // pip reports canonical casing; the import uses lowercase.
    let temp = Project::empty();
    temp.preinstall("PyYAML", "6.0");

    temp.px()
        .args(&["deps", "-c", "import yaml"])
        .passes()
        .stdout_has("Installed packages: pyyaml==6.0")
        .stdout_lacks("Missing packages");
}

#[test]
fn json_report_lists_required_and_missing() {
    let temp = Project::empty();

    let out = temp
        .px()
        .args(&["deps", "-c", "import PIL", "--format", "json"])
        .passes()
        .json();

    assert_eq!(out["required"][0]["import_name"], serde_json::json!("PIL"));
    assert_eq!(
        out["required"][0]["install_name"],
        serde_json::json!("pillow")
    );
    assert_eq!(out["installed"], serde_json::json!([]));
    assert_eq!(out["missing"][0]["install_name"], serde_json::json!("pillow"));
}

#[test]
fn deps_never_executes_the_source() {
    // A source that would hang at run time returns immediately.
    let temp = Project::empty();

    temp.px()
        .args(&["deps", "-c", "while True: pass  # FAKE:HANG"])
        .passes()
        .stdout_has("No external packages required.");
}

#[test]
fn broken_source_fails_the_report() {
    let temp = Project::empty();

    temp.px()
        .args(&["deps", "-c", "import "])
        .fails_with(1)
        .stderr_has("malformed import");
}
