// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::container::{ContainerAdapter, ContainerError, ExecOutput};
use crate::pkg::{InstallOutput, PkgAdapter, PkgError};
use async_trait::async_trait;
use px_core::ResourceLimits;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Wrapper that adds tracing to any PkgAdapter
#[derive(Clone)]
pub struct TracedPkgAdapter<P> {
    inner: P,
}

impl<P> TracedPkgAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PkgAdapter> PkgAdapter for TracedPkgAdapter<P> {
    async fn install(&self, package: &str) -> Result<InstallOutput, PkgError> {
        let span = tracing::info_span!("pkg.install", package);
        let _guard = span.enter();

        tracing::info!("installing");

        // Precondition: pip with an empty name would read requirements.txt
        if package.trim().is_empty() {
            tracing::error!("empty package name");
            return Err(PkgError::CommandFailed("empty package name".to_string()));
        }

        let start = std::time::Instant::now();
        let result = self.inner.install(package).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(output) if output.success() => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "installed")
            }
            Ok(output) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                exit_code = output.exit_code,
                detail = output.summary(),
                "install failed"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "install errored"
            ),
        }

        result
    }

    async fn list_installed(&self) -> Result<HashMap<String, String>, PkgError> {
        let result = self.inner.list_installed().await;
        tracing::trace!(
            count = result.as_ref().map(|m| m.len()).ok(),
            "listed installed packages"
        );
        result
    }
}

/// Wrapper that adds tracing to any ContainerAdapter
#[derive(Clone)]
pub struct TracedContainerAdapter<C> {
    inner: C,
}

impl<C> TracedContainerAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ContainerAdapter> ContainerAdapter for TracedContainerAdapter<C> {
    async fn version(&self) -> Result<String, ContainerError> {
        let result = self.inner.version().await;
        tracing::trace!(version = ?result.as_ref().ok(), "checked runtime");
        result
    }

    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        let result = self.inner.image_exists(image).await;
        tracing::trace!(image, exists = ?result.as_ref().ok(), "checked image");
        result
    }

    async fn pull(&self, image: &str) -> Result<(), ContainerError> {
        let span = tracing::info_span!("container.pull", image);
        let _guard = span.enter();

        tracing::info!("pulling image");

        let start = std::time::Instant::now();
        let result = self.inner.pull(image).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "image pulled"),
            Err(e) => {
                tracing::error!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "pull failed")
            }
        }

        result
    }

    async fn run(
        &self,
        name: &str,
        image: &str,
        limits: &ResourceLimits,
        mount: Option<&Path>,
    ) -> Result<String, ContainerError> {
        let span = tracing::info_span!("container.run", name, image);
        let _guard = span.enter();

        tracing::info!(mounted = mount.is_some(), "starting container");

        let start = std::time::Instant::now();
        let result = self.inner.run(name, image, limits, mount).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(container_id) => tracing::info!(
                container_id,
                elapsed_ms = elapsed.as_millis() as u64,
                "container started"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "start failed"
            ),
        }

        result
    }

    async fn is_running(&self, name: &str) -> Result<bool, ContainerError> {
        let result = self.inner.is_running(name).await;
        tracing::trace!(name, running = ?result.as_ref().ok(), "checked");
        result
    }

    async fn copy_in(&self, name: &str, src: &Path, dest: &str) -> Result<(), ContainerError> {
        let span = tracing::info_span!("container.copy_in", name, dest);
        let _guard = span.enter();

        // Precondition: source must exist on the host
        if !src.exists() {
            tracing::error!(src = %src.display(), "source file does not exist");
            return Err(ContainerError::CommandFailed(format!(
                "source file does not exist: {}",
                src.display()
            )));
        }

        let result = self.inner.copy_in(name, src, dest).await;
        match &result {
            Ok(()) => tracing::debug!("copied"),
            Err(e) => tracing::error!(error = %e, "copy failed"),
        }

        result
    }

    async fn exec(
        &self,
        name: &str,
        command: &[&str],
        env: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ContainerError> {
        let span = tracing::info_span!("container.exec", name);
        let _guard = span.enter();

        tracing::debug!(
            program = command.first().copied().unwrap_or(""),
            timeout = ?timeout,
            env_count = env.len(),
            "executing"
        );

        let start = std::time::Instant::now();
        let result = self.inner.exec(name, command, env, timeout).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(output) => tracing::debug!(
                exit_code = output.exit_code,
                timed_out = output.timed_out,
                elapsed_ms = elapsed.as_millis() as u64,
                "executed"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "exec failed"
            ),
        }

        result
    }

    async fn remove_file(&self, name: &str, path: &str) -> Result<(), ContainerError> {
        let span = tracing::info_span!("container.remove_file", name, path);
        let _guard = span.enter();

        let result = self.inner.remove_file(name, path).await;
        // Cleanup failing is often acceptable (container already gone)
        match &result {
            Ok(()) => tracing::debug!("removed"),
            Err(e) => tracing::warn!(error = %e, "remove failed (may be expected)"),
        }

        result
    }

    async fn stop(&self, name: &str) -> Result<(), ContainerError> {
        let span = tracing::info_span!("container.stop", name);
        let _guard = span.enter();

        let result = self.inner.stop(name).await;
        // stop() failing is often acceptable (container already gone)
        match &result {
            Ok(()) => tracing::info!("stopped"),
            Err(e) => tracing::warn!(error = %e, "stop failed (may be expected)"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
