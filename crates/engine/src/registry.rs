// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installed-package registry shared across sandbox runs

use px_adapters::{PkgAdapter, PkgError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Snapshot of what the package manager reports as installed.
///
/// Keys are lowercased package names; lookups are case-insensitive to
/// match pip's own name handling.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    packages: HashMap<String, String>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, packages: HashMap<String, String>) {
        self.packages = packages;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(&name.to_lowercase())
    }

    pub fn version(&self, name: &str) -> Option<String> {
        self.packages.get(&name.to_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Registry shared between concurrent sandbox runs.
///
/// The data lock is scoped and never held across an await; the separate
/// install gate serializes installer invocations, because installing
/// mutates interpreter state all runs share.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    data: Arc<Mutex<PackageRegistry>>,
    install_gate: Arc<tokio::sync::Mutex<()>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-query the package manager and swap in the fresh snapshot.
    pub async fn refresh<P: PkgAdapter>(&self, pkg: &P) -> Result<(), PkgError> {
        let packages = pkg.list_installed().await?;
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.replace(packages);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
    }

    pub fn version(&self, name: &str) -> Option<String> {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .version(name)
    }

    pub fn snapshot(&self) -> PackageRegistry {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Take the install gate. Held for the whole of one installer
    /// invocation, across its awaits.
    pub async fn lock_installs(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.install_gate.lock().await
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
