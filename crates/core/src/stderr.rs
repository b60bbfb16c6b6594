// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interpreter stderr pattern matching.
//!
//! The retry loop keys off text the interpreter prints, which is a
//! heuristic by nature. Everything fragile about that lives here, behind
//! two functions, so a CPython message change has one place to land. The
//! hard attempt ceiling in the orchestrator is the actual safety net.
//!
//! Patterns recognized (CPython 3.6+):
//!
//! | stderr contains                      | meaning            |
//! |--------------------------------------|--------------------|
//! | `No module named 'x'` / `"x"`        | missing module `x` |
//! | `SyntaxError` / `IndentationError` / `TabError` | broken source |
//!
//! The pre-3.6 unquoted form `No module named x` is deliberately not
//! extracted; unquoted trailing text is too ambiguous to install from.

use crate::outcome::ErrorKind;

/// Marker CPython prints when an import target does not exist.
pub const MISSING_MODULE_MARKER: &str = "No module named";

/// Extract the missing module from stderr, reduced to its top-level name.
///
/// Looks for the first quoted identifier after the marker:
/// `ModuleNotFoundError: No module named 'requests'` yields `requests`,
/// `No module named 'pkg.sub'` yields `pkg`.
pub fn missing_module(stderr: &str) -> Option<String> {
    let at = stderr.find(MISSING_MODULE_MARKER)?;
    let rest = &stderr[at + MISSING_MODULE_MARKER.len()..];

    let mut chars = rest.char_indices();
    let (open, quote) = loop {
        match chars.next() {
            Some((i, c)) if c == '\'' || c == '"' => break (i, c),
            // Only whitespace may sit between the marker and the quote;
            // anything else is a different sentence using the same words.
            Some((_, c)) if c.is_whitespace() => continue,
            _ => return None,
        }
    };

    let body = &rest[open + quote.len_utf8()..];
    let close = body.find(quote)?;
    let name = &body[..close];
    let top = name.split('.').next().unwrap_or(name);

    if top.is_empty() || !top.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(top.to_string())
}

/// Classify a failed run from its stderr.
///
/// Only called for non-timeout failures; timeouts are classified by the
/// backend that enforced them.
pub fn classify(stderr: &str, exit_code: Option<i32>) -> ErrorKind {
    if stderr.contains("SyntaxError")
        || stderr.contains("IndentationError")
        || stderr.contains("TabError")
    {
        return ErrorKind::Syntax;
    }
    if exit_code.is_some() {
        return ErrorKind::Runtime;
    }
    // Killed by a signal, or never produced an exit status.
    if stderr.trim().is_empty() {
        ErrorKind::Unknown
    } else {
        ErrorKind::Runtime
    }
}

#[cfg(test)]
#[path = "stderr_tests.rs"]
mod tests;
