// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential package installation with continue-on-error

use crate::SharedRegistry;
use px_adapters::PkgAdapter;
use px_core::{InstallationResult, PackageSpec};

/// Installs missing packages one at a time.
///
/// One failed package does not block the rest; every outcome is recorded
/// and the caller decides what a partial failure means.
#[derive(Clone)]
pub struct PackageInstaller<P> {
    pkg: P,
    registry: SharedRegistry,
}

impl<P: PkgAdapter> PackageInstaller<P> {
    pub fn new(pkg: P, registry: SharedRegistry) -> Self {
        Self { pkg, registry }
    }

    /// Install every spec, in order. Holds the shared install gate for
    /// the whole batch so concurrent runs do not interleave installs.
    pub async fn install(&self, missing: &[PackageSpec]) -> Vec<InstallationResult> {
        if missing.is_empty() {
            return Vec::new();
        }

        let _gate = self.registry.lock_installs().await;

        let mut results = Vec::with_capacity(missing.len());
        for spec in missing {
            let result = match self.pkg.install(&spec.install_name).await {
                Ok(output) if output.success() => {
                    // The registry only learns about the new package from a
                    // fresh query; pip's own output is not authoritative.
                    if let Err(e) = self.registry.refresh(&self.pkg).await {
                        tracing::warn!(
                            package = %spec.install_name,
                            error = %e,
                            "registry refresh after install failed"
                        );
                    }
                    InstallationResult {
                        package: spec.clone(),
                        success: true,
                        message: output.summary(),
                    }
                }
                Ok(output) => {
                    tracing::warn!(
                        package = %spec.install_name,
                        exit_code = output.exit_code,
                        "install failed"
                    );
                    InstallationResult {
                        package: spec.clone(),
                        success: false,
                        message: output.summary(),
                    }
                }
                Err(e) => {
                    tracing::warn!(package = %spec.install_name, error = %e, "install errored");
                    InstallationResult {
                        package: spec.clone(),
                        success: false,
                        message: e.to_string(),
                    }
                }
            };
            results.push(result);
        }

        results
    }
}

#[cfg(test)]
#[path = "installer_tests.rs"]
mod tests;
