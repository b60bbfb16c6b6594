// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static analysis of Python source text.
//!
//! The analyzer extracts every imported top-level module name and classifies
//! it against the fixed builtin and alias tables. Classification is
//! deterministic: the same source always yields the same [`ImportSet`],
//! regardless of which host runs the analysis.

use std::collections::BTreeMap;

use serde::Serialize;

mod analyzer;
mod scanner;

pub use analyzer::SourceAnalyzer;

/// How an imported module name relates to the package ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Ships with the interpreter; never installed.
    Builtin,
    /// Listed in the alias table; installable under a known package name.
    ThirdParty,
    /// Not in either table; treated as installable under its own name.
    Unknown,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Classification::Builtin => "builtin",
            Classification::ThirdParty => "third-party",
            Classification::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Imported top-level module names with their classification.
///
/// Keys are unique and iterate in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet {
    modules: BTreeMap<String, Classification>,
}

impl ImportSet {
    /// Record a module. Re-inserting an existing name keeps the first
    /// classification; the tables are fixed, so they never disagree.
    pub fn insert(&mut self, name: String, classification: Classification) {
        self.modules.entry(name).or_insert(classification);
    }

    /// Classification for a module name, if it was imported.
    pub fn get(&self, name: &str) -> Option<Classification> {
        self.modules.get(name).copied()
    }

    /// All entries in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Classification)> {
        self.modules.iter().map(|(name, c)| (name.as_str(), *c))
    }

    /// Names that require a package to be present before execution
    /// (everything that is not builtin).
    pub fn required_imports(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .filter(|(_, c)| **c != Classification::Builtin)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<(String, Classification)> for ImportSet {
    fn from_iter<I: IntoIterator<Item = (String, Classification)>>(iter: I) -> Self {
        let mut set = ImportSet::default();
        for (name, c) in iter {
            set.insert(name, c);
        }
        set
    }
}

/// Source rejected before execution.
///
/// The whole analysis fails; there is no partial import set for broken
/// source. Line numbers are 1-based physical lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unbalanced '{bracket}'")]
    UnbalancedBracket { line: usize, bracket: char },

    #[error("line {line}: expected ':' in '{keyword}' statement")]
    MissingColon { line: usize, keyword: String },

    #[error("line {line}: malformed import: {detail}")]
    InvalidImport { line: usize, detail: String },
}
