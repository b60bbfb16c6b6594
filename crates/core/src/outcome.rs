// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution results and the failure taxonomy.

use std::time::Duration;

use serde::Serialize;

/// Why an execution attempt failed.
///
/// Serialized names match the interpreter-facing error types that callers
/// already branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Source rejected before or during parsing; never retried.
    #[serde(rename = "SyntaxError")]
    Syntax,
    /// A required package could not be installed.
    #[serde(rename = "DependencyInstallError")]
    DependencyInstall,
    /// Wall-clock limit hit; the process was killed.
    #[serde(rename = "Timeout")]
    Timeout,
    /// The code ran and raised, or exited nonzero.
    #[serde(rename = "RuntimeError")]
    Runtime,
    /// Nothing recognizable in the failure.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::DependencyInstall => "DependencyInstallError",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Outcome of one execution attempt.
///
/// Invariant: `success` is true exactly when the process exited zero and
/// no timeout fired, in which case `error_kind` is `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed or never ran.
    pub exit_code: Option<i32>,
    pub error_kind: Option<ErrorKind>,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl ExecutionResult {
    /// Result of a process that ran to completion (success or not).
    /// Classification of failures is the caller's job.
    pub fn from_output(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            success: exit_code == Some(0),
            stdout,
            stderr,
            exit_code,
            error_kind: None,
            duration,
        }
    }

    /// Result of a run that hit the wall-clock limit and was killed.
    /// Partial output captured before the kill is preserved.
    pub fn timeout(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            success: false,
            stdout,
            stderr,
            exit_code: None,
            error_kind: Some(ErrorKind::Timeout),
            duration,
        }
    }

    /// Result for source rejected before any execution.
    pub fn rejected(message: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message,
            exit_code: None,
            error_kind: Some(ErrorKind::Syntax),
            duration: Duration::ZERO,
        }
    }

    /// Result for an internal failure that produced no process at all.
    pub fn internal(message: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message,
            exit_code: None,
            error_kind: Some(ErrorKind::Unknown),
            duration: Duration::ZERO,
        }
    }

    /// Attach a failure classification. No-op on success, so the
    /// success/error_kind invariant cannot be broken.
    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        if !self.success {
            self.error_kind = Some(kind);
        }
        self
    }

    pub fn timed_out(&self) -> bool {
        self.error_kind == Some(ErrorKind::Timeout)
    }
}
