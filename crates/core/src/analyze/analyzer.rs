// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::scanner;
use super::{AnalyzeError, Classification, ImportSet};
use crate::{aliases, builtins};

/// Extracts and classifies the imports of a Python source blob.
///
/// Stateless; the classification tables are compiled in. Broken source
/// fails the whole analysis rather than producing a partial set, so the
/// caller can refuse to execute it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceAnalyzer;

impl SourceAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, source: &str) -> Result<ImportSet, AnalyzeError> {
        let names = scanner::collect_imports(source)?;
        let mut set = ImportSet::default();
        for name in names {
            let classification = classify(&name);
            set.insert(name, classification);
        }
        Ok(set)
    }
}

fn classify(module: &str) -> Classification {
    if builtins::is_builtin(module) {
        Classification::Builtin
    } else if aliases::is_known(module) {
        Classification::ThirdParty
    } else {
        Classification::Unknown
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
