//! Timeout specs
//!
//! A hung script is killed at the deadline; output produced before the
//! kill survives into the report.

use crate::prelude::*;

#[test]
fn hung_script_is_killed_at_the_deadline() {
    let temp = Project::empty();

    temp.px()
        .args(&[
            "run",
            "-c",
            "while True: pass  # FAKE:HANG",
            "--timeout",
            "1",
        ])
        .fails_with(1)
        .stdout_has("Error type: Timeout")
        .stdout_has("Attempts: 1");
}

#[test]
fn partial_output_survives_a_timeout() {
    let temp = Project::empty();

    temp.px()
        .args(&[
            "run",
            "-c",
            "print('before')\nwhile True: pass  # FAKE:HANG",
            "--timeout",
            "1",
        ])
        .fails_with(1)
        .stdout_has("before")
        .stdout_has("Error type: Timeout");
}
