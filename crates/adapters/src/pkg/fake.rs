// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake package manager adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InstallOutput, PkgAdapter, PkgError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded package manager call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PkgCall {
    Install { package: String },
    ListInstalled,
}

/// Fake package manager adapter for testing
///
/// Installs succeed by default and register the package at version
/// `0.0.0`; individual packages can be scripted to fail or to succeed
/// without becoming importable.
#[derive(Clone, Default)]
pub struct FakePkgAdapter {
    installed: Arc<Mutex<HashMap<String, String>>>,
    fail_install: Arc<Mutex<HashSet<String>>>,
    phantom_install: Arc<Mutex<HashSet<String>>>,
    fail_list: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<PkgCall>>>,
}

impl FakePkgAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PkgCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of install calls for one package
    pub fn install_count(&self, package: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(call, PkgCall::Install { package: p } if p == package)
            })
            .count()
    }

    /// Pre-seed an installed package
    pub fn set_installed(&self, name: &str, version: &str) {
        self.installed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_lowercase(), version.to_string());
    }

    /// Make installs of this package fail
    pub fn fail_install(&self, package: &str) {
        self.fail_install
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(package.to_string());
    }

    /// Make installs of this package report success without registering it
    pub fn install_without_registering(&self, package: &str) {
        self.phantom_install
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(package.to_string());
    }

    /// Make list_installed fail
    pub fn fail_list_installed(&self) {
        *self.fail_list.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }
}

#[async_trait]
impl PkgAdapter for FakePkgAdapter {
    async fn install(&self, package: &str) -> Result<InstallOutput, PkgError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PkgCall::Install {
                package: package.to_string(),
            });

        let failing = self
            .fail_install
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(package);
        if failing {
            return Ok(InstallOutput {
                exit_code: Some(1),
                stdout: String::new(),
                stderr: format!("ERROR: No matching distribution found for {package}\n"),
            });
        }

        let phantom = self
            .phantom_install
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(package);
        if !phantom {
            self.installed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(package.to_lowercase(), "0.0.0".to_string());
        }

        Ok(InstallOutput {
            exit_code: Some(0),
            stdout: format!("Successfully installed {package}-0.0.0\n"),
            stderr: String::new(),
        })
    }

    async fn list_installed(&self) -> Result<HashMap<String, String>, PkgError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PkgCall::ListInstalled);

        if *self.fail_list.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(PkgError::CommandFailed("pip list failed".to_string()));
        }

        Ok(self
            .installed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
