// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sandbox orchestrator: analyze, resolve, install, execute, retry

use crate::backend::ExecutionBackend;
use crate::{DependencyResolver, PackageInstaller, SetupError, SharedRegistry};
use px_adapters::PkgAdapter;
use px_core::stderr::{self, missing_module};
use px_core::{
    DependencyReport, ErrorKind, ExecutionRequest, ExecutionResult, ImportSet,
    InstallationResult, PackageSpec, RetryState, RunReport, SourceAnalyzer,
};

/// Drives one piece of source through the full pipeline.
///
/// Everything that can go wrong with the code itself, its dependencies,
/// or its execution ends up inside the returned `RunReport`; `run` only
/// errors when the sandbox could not be set up at all.
#[derive(Clone)]
pub struct Sandbox<P, B> {
    analyzer: SourceAnalyzer,
    resolver: DependencyResolver<P>,
    installer: PackageInstaller<P>,
    backend: B,
    max_attempts: u32,
}

impl<P: PkgAdapter, B: ExecutionBackend> Sandbox<P, B> {
    pub fn new(pkg: P, registry: SharedRegistry, backend: B, max_attempts: u32) -> Self {
        Self {
            analyzer: SourceAnalyzer::new(),
            resolver: DependencyResolver::new(pkg.clone(), registry.clone()),
            installer: PackageInstaller::new(pkg, registry),
            backend,
            max_attempts,
        }
    }

    /// Verify the backend before the first attempt.
    pub async fn preflight(&self) -> Result<(), SetupError> {
        self.backend.preflight().await.map_err(SetupError::from)
    }

    /// Release backend resources.
    pub async fn shutdown(&self) -> Result<(), SetupError> {
        self.backend.shutdown().await.map_err(SetupError::from)
    }

    pub async fn run(&self, request: &ExecutionRequest) -> Result<RunReport, SetupError> {
        let span = tracing::info_span!("sandbox.run", backend = %self.backend.kind());
        let _guard = span.enter();

        let imports = match self.analyzer.analyze(&request.code) {
            Ok(imports) => imports,
            Err(e) => {
                tracing::warn!(error = %e, "analysis rejected the source");
                return Ok(RunReport {
                    imports: ImportSet::default(),
                    dependencies: DependencyReport::default(),
                    installs: Vec::new(),
                    execution: ExecutionResult::rejected(e.to_string()),
                    attempts: 0,
                });
            }
        };

        // Setup boundary: a registry that cannot even be queried is the
        // caller's problem. Everything past this point lands in the report.
        let dependencies = self.resolver.resolve(&imports).await?;

        let mut retry = RetryState::new(self.max_attempts);
        let mut installs: Vec<InstallationResult> = Vec::new();

        retry.record_all(dependencies.missing.iter().map(|s| s.import_name.as_str()));
        installs.extend(self.installer.install(&dependencies.missing).await);

        let execution = loop {
            let result = match self.backend.run(request).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "backend failed to run the code");
                    break ExecutionResult::internal(e.to_string());
                }
            };

            if result.success || result.timed_out() {
                break result;
            }

            if let Some(module) = missing_module(&result.stderr) {
                if !retry.attempted(&module) && retry.can_retry() {
                    retry.record(&module);
                    let spec = PackageSpec::for_import(&module);
                    tracing::info!(
                        module,
                        package = %spec.install_name,
                        attempt = retry.attempt(),
                        "missing module at runtime, installing and retrying"
                    );
                    installs.extend(self.installer.install(std::slice::from_ref(&spec)).await);
                    retry.next_attempt();
                    // Re-execute even if that install failed; the next
                    // failure carries the terminal classification.
                    continue;
                }
                break classify_missing(result, &module, &installs);
            }

            break classify(result);
        };

        tracing::info!(
            success = execution.success,
            attempts = retry.attempt(),
            "run finished"
        );

        Ok(RunReport {
            imports,
            dependencies,
            installs,
            execution,
            attempts: retry.attempt(),
        })
    }
}

/// Attach a classification to an unclassified failure.
fn classify(result: ExecutionResult) -> ExecutionResult {
    if result.error_kind.is_some() {
        return result;
    }
    let kind = stderr::classify(&result.stderr, result.exit_code);
    result.with_error_kind(kind)
}

/// Terminal classification for a missing module that will not be retried:
/// a failed install for it means the install was the problem; anything
/// else is the code's own runtime failure.
fn classify_missing(
    result: ExecutionResult,
    module: &str,
    installs: &[InstallationResult],
) -> ExecutionResult {
    let package = PackageSpec::for_import(module).install_name;
    let install_failed = installs
        .iter()
        .rev()
        .find(|r| r.package.install_name == package)
        .map(|r| !r.success)
        .unwrap_or(false);

    if install_failed {
        return result.with_error_kind(ErrorKind::DependencyInstall);
    }
    classify(result)
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
