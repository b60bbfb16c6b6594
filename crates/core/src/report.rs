// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency and run reports returned to callers.

use serde::Serialize;

use crate::aliases::PackageSpec;
use crate::analyze::ImportSet;
use crate::outcome::ExecutionResult;

/// A package present in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledPackage {
    /// Registry name, lowercased.
    pub name: String,
    pub version: String,
}

impl std::fmt::Display for InstalledPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// What the source needs versus what the registry already has.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyReport {
    /// Non-builtin imports mapped to installable packages, sorted, deduped.
    pub required: Vec<PackageSpec>,
    /// Required packages found in the registry, with versions.
    pub installed: Vec<InstalledPackage>,
    /// Required packages absent from the registry.
    pub missing: Vec<PackageSpec>,
}

impl DependencyReport {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

impl std::fmt::Display for DependencyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.required.is_empty() {
            return write!(f, "No external packages required.");
        }
        write!(f, "Required packages: {}", join(&self.required))?;
        if !self.installed.is_empty() {
            write!(f, "\nInstalled packages: {}", join(&self.installed))?;
        }
        if !self.missing.is_empty() {
            write!(f, "\nMissing packages: {}", join(&self.missing))?;
        }
        Ok(())
    }
}

/// Outcome of a single package install. Never batched; one per package.
#[derive(Debug, Clone, Serialize)]
pub struct InstallationResult {
    pub package: PackageSpec,
    pub success: bool,
    /// Package-manager output worth keeping: version line on success,
    /// error tail on failure.
    pub message: String,
}

/// Everything a run produced, through every retry.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub imports: ImportSet,
    pub dependencies: DependencyReport,
    /// Install outcomes in the order they happened, initial pass and
    /// retries alike.
    pub installs: Vec<InstallationResult>,
    pub execution: ExecutionResult,
    /// Execute attempts performed, 0 when the source never ran.
    pub attempts: u32,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.execution.success
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.execution.success {
            "success"
        } else {
            "failed"
        };
        let elapsed = humantime::format_duration(self.execution.duration);
        writeln!(f, "Status: {status} ({elapsed})")?;
        write!(f, "Attempts: {}", self.attempts)?;

        if !self.dependencies.required.is_empty() {
            write!(f, "\n{}", self.dependencies)?;
        }

        let failures: Vec<&InstallationResult> =
            self.installs.iter().filter(|i| !i.success).collect();
        if !failures.is_empty() {
            write!(f, "\nInstall failures:")?;
            for failure in failures {
                write!(f, "\n  {}: {}", failure.package, failure.message)?;
            }
        }

        if !self.execution.stdout.is_empty() {
            write!(f, "\n\nStdout:\n{}", self.execution.stdout.trim_end())?;
        }
        if !self.execution.stderr.is_empty() {
            write!(f, "\n\nStderr:\n{}", self.execution.stderr.trim_end())?;
        }
        if let Some(kind) = self.execution.error_kind {
            write!(f, "\n\nError type: {kind}")?;
        }
        Ok(())
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
