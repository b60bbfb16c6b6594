// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package manager adapters

mod container;
mod pip;

pub use container::ContainerPipAdapter;
pub use pip::PipAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePkgAdapter, PkgCall};

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from package manager operations
#[derive(Debug, Error)]
pub enum PkgError {
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("install timed out after {0} seconds")]
    InstallTimeout(u64),
    #[error("could not parse package list: {0}")]
    BadListOutput(String),
}

/// Captured output of one install invocation.
///
/// A nonzero exit is not an adapter error; the installer records it and
/// moves on to the next package.
#[derive(Debug, Clone)]
pub struct InstallOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl InstallOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// One line worth keeping for the install record: the last nonempty
    /// stderr line on failure, the last stdout line otherwise.
    pub fn summary(&self) -> String {
        let source = if self.success() {
            &self.stdout
        } else {
            &self.stderr
        };
        source
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

/// Adapter for the package manager (pip)
#[async_trait]
pub trait PkgAdapter: Clone + Send + Sync + 'static {
    /// Install one package by its distribution name.
    async fn install(&self, package: &str) -> Result<InstallOutput, PkgError>;

    /// List installed packages as lowercased name -> version.
    async fn list_installed(&self) -> Result<HashMap<String, String>, PkgError>;
}
