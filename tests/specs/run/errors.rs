//! Pre-execution and setup failure specs
//!
//! Broken source never runs; a broken environment is a setup error.

use crate::prelude::*;

#[test]
fn syntax_error_is_rejected_before_execution() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "if True\n    print(1)"])
        .fails_with(1)
        .stdout_has("Error type: SyntaxError")
        .stdout_has("Attempts: 0")
        .stdout_has("line 1");
}

#[test]
fn interpreter_rejected_syntax_is_classified() {
    // Slips past the structural check; the interpreter rejects it.
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "x = 1 +  # FAKE:SYNTAX"])
        .fails_with(1)
        .stdout_has("Error type: SyntaxError");
}

#[test]
fn missing_interpreter_is_a_setup_error() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "print(1)", "--python", "/nonexistent/python3"])
        .fails_with(2)
        .stderr_has("/nonexistent/python3");
}

#[test]
fn missing_source_file_is_a_usage_error() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "nope.py"])
        .fails_with(2)
        .stderr_has("failed to read nope.py");
}

#[test]
fn no_source_is_a_usage_error() {
    let temp = Project::empty();

    temp.px()
        .args(&["run"])
        .fails_with(2)
        .stderr_has("no source given");
}

#[test]
fn file_and_inline_code_conflict() {
    let temp = Project::empty();
    temp.file("a.py", "print(1)\n");

    temp.px()
        .args(&["run", "a.py", "-c", "print(2)"])
        .fails_with(2)
        .stderr_has("cannot be used with");
}
