//! Configuration precedence specs
//!
//! Defaults, then px.toml, then PX_* environment, then flags.

use crate::prelude::*;

#[test]
fn config_file_in_project_root_is_discovered() {
    let temp = Project::empty();
    temp.file("px.toml", "run_timeout = \"1s\"\n");

    // The 1s file timeout kills the hung script; defaults would wait 30s.
    temp.px()
        .args(&["run", "-c", "while True: pass  # FAKE:HANG"])
        .fails_with(1)
        .stdout_has("Error type: Timeout");
}

#[test]
fn environment_overrides_the_config_file() {
    let temp = Project::empty();
    temp.file("px.toml", "max_attempts = 3\n");

    // PX_MAX_ATTEMPTS=1 wins: a runtime-discovered module is not retried.
    temp.px()
        .args(&[
            "run",
            "-c",
            "r = __import__('requests')  # FAKE:MISSING:requests\nprint('fetched')",
        ])
        .env("PX_MAX_ATTEMPTS", "1")
        .fails_with(1)
        .stdout_has("Attempts: 1");
}

#[test]
fn flags_override_the_environment() {
    let temp = Project::empty();

    temp.px()
        .args(&[
            "run",
            "-c",
            "r = __import__('requests')  # FAKE:MISSING:requests\nprint('fetched')",
        ])
        .env("PX_MAX_ATTEMPTS", "1")
        .args(&["--max-attempts", "3"])
        .passes()
        .stdout_has("Attempts: 2")
        .stdout_has("fetched");
}

#[test]
fn malformed_config_file_is_a_setup_error() {
    let temp = Project::empty();
    temp.file("px.toml", "backend = \"marscloud\"\n");

    temp.px()
        .args(&["run", "-c", "print(1)"])
        .fails_with(2)
        .stderr_has("failed to parse");
}

#[test]
fn explicit_config_flag_must_exist() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "--config", "missing.toml", "-c", "print(1)"])
        .fails_with(2)
        .stderr_has("failed to read");
}

#[test]
fn invalid_environment_value_is_a_setup_error() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "print(1)"])
        .env("PX_RUN_TIMEOUT", "soon")
        .fails_with(2)
        .stderr_has("PX_RUN_TIMEOUT");
}

#[test]
fn python_override_points_at_a_different_interpreter() {
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "print(1)"])
        .env("PX_PYTHON", "/nonexistent/snake")
        .fails_with(2)
        .stderr_has("/nonexistent/snake");
}
