//! Basic execution specs
//!
//! Source intake (file, inline, stdin), output rendering, exit codes.

use crate::prelude::*;

#[test]
fn inline_code_executes_and_prints() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "print('hi')"])
        .passes()
        .stdout_has("Status: success")
        .stdout_has("Attempts: 1")
        .stdout_has("hi");
}

#[test]
fn file_source_executes() {
    let temp = Project::empty();
    temp.file("hello.py", "print('from file')\n");

    temp.px()
        .args(&["run", "hello.py"])
        .passes()
        .stdout_has("from file");
}

#[test]
fn stdin_source_executes() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "--stdin"])
        .stdin("print('piped')\n")
        .passes()
        .stdout_has("piped");
}

#[test]
fn json_format_reports_the_full_run() {
    let temp = Project::empty();

    let out = temp
        .px()
        .args(&["run", "-c", "print('hi')", "--format", "json"])
        .passes()
        .json();

    assert_eq!(out["execution"]["success"], serde_json::json!(true));
    assert_eq!(out["execution"]["stdout"], serde_json::json!("hi\n"));
    assert_eq!(out["attempts"], serde_json::json!(1));
    assert!(out["execution"]["error_kind"].is_null());
}

#[test]
fn runtime_failure_exits_one_with_error_type() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "1/0  # FAKE:FAIL"])
        .fails_with(1)
        .stdout_has("Status: failed")
        .stdout_has("Error type: RuntimeError")
        .stdout_has("ZeroDivisionError");
}

#[test]
fn builtin_imports_report_no_packages() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "import os, json\nprint('ok')"])
        .passes()
        .stdout_has("ok")
        .stdout_lacks("Required packages");
}
