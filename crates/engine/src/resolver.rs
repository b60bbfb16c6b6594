// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps imported modules to installable packages

use crate::SharedRegistry;
use px_adapters::{PkgAdapter, PkgError};
use px_core::{DependencyReport, ImportSet, InstalledPackage, PackageSpec};

/// Resolves an import set against the installed-package registry.
#[derive(Clone)]
pub struct DependencyResolver<P> {
    pkg: P,
    registry: SharedRegistry,
}

impl<P: PkgAdapter> DependencyResolver<P> {
    pub fn new(pkg: P, registry: SharedRegistry) -> Self {
        Self { pkg, registry }
    }

    /// One registry refresh, then a pure set computation: required is
    /// every non-builtin import mapped through the alias table, installed
    /// is the intersection with the registry, missing is the rest.
    pub async fn resolve(&self, imports: &ImportSet) -> Result<DependencyReport, PkgError> {
        self.registry.refresh(&self.pkg).await?;
        let snapshot = self.registry.snapshot();

        let mut required: Vec<PackageSpec> = imports
            .required_imports()
            .map(PackageSpec::for_import)
            .collect();
        required.sort_by(|a, b| a.install_name.cmp(&b.install_name));
        required.dedup_by(|a, b| a.install_name == b.install_name);

        let mut installed = Vec::new();
        let mut missing = Vec::new();
        for spec in &required {
            match snapshot.version(&spec.install_name) {
                Some(version) => installed.push(InstalledPackage {
                    name: spec.install_name.clone(),
                    version,
                }),
                None => missing.push(spec.clone()),
            }
        }

        tracing::debug!(
            required = required.len(),
            installed = installed.len(),
            missing = missing.len(),
            "resolved dependencies"
        );

        Ok(DependencyReport {
            required,
            installed,
            missing,
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
