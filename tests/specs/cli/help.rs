//! CLI surface specs
//!
//! Help, version, completions, and unknown-command behavior.

use crate::prelude::*;

#[test]
fn help_lists_all_subcommands() {
    let temp = Project::empty();

    temp.px()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("deps")
        .stdout_has("completions");
}

#[test]
fn version_prints() {
    let temp = Project::empty();

    temp.px().args(&["--version"]).passes().stdout_has("px");
}

#[test]
fn completions_generate_for_bash() {
    let temp = Project::empty();

    temp.px()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_px");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let temp = Project::empty();

    temp.px().args(&["frobnicate"]).fails_with(2);
}

#[test]
fn run_help_documents_the_backend_flag() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--backend")
        .stdout_has("--timeout")
        .stdout_has("--max-attempts");
}
