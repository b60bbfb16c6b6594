// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container-process backend

use super::{BackendError, ExecutionBackend};
use async_trait::async_trait;
use px_adapters::{ContainerAdapter, ContainerError};
use px_core::{BackendKind, ContainerConfig, ExecutionRequest, ExecutionResult, ResourceLimits};
use std::time::Instant;
use uuid::Uuid;

/// Runs code inside a long-lived sandbox container.
///
/// The container is started on first use and shared by every run (and
/// by concurrent runs); each run gets its own script file inside it.
#[derive(Clone)]
pub struct ContainerBackend<C> {
    runtime: C,
    config: ContainerConfig,
    limits: ResourceLimits,
}

impl<C: ContainerAdapter> ContainerBackend<C> {
    pub fn new(runtime: C, config: ContainerConfig, limits: ResourceLimits) -> Self {
        Self {
            runtime,
            config,
            limits,
        }
    }

    /// Name of the container this backend runs in.
    pub fn container_name(&self) -> &str {
        &self.config.name
    }

    /// Idempotent start: already-running is success, and losing a start
    /// race against a concurrent caller is success too.
    async fn ensure_running(&self) -> Result<(), BackendError> {
        if self.runtime.is_running(&self.config.name).await? {
            return Ok(());
        }

        if !self.runtime.image_exists(&self.config.image).await? {
            self.runtime.pull(&self.config.image).await?;
        }

        let mount = if self.config.mount_workdir {
            Some(std::env::current_dir()?)
        } else {
            None
        };

        match self
            .runtime
            .run(&self.config.name, &self.config.image, &self.limits, mount.as_deref())
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                // A concurrent caller may have started it between our check
                // and our run; that counts as running.
                if self.runtime.is_running(&self.config.name).await? {
                    tracing::debug!(name = %self.config.name, "lost start race, container is up");
                    Ok(())
                } else {
                    Err(e.into())
                }
            }
        }
    }
}

#[async_trait]
impl<C: ContainerAdapter> ExecutionBackend for ContainerBackend<C> {
    fn kind(&self) -> BackendKind {
        BackendKind::Container
    }

    async fn preflight(&self) -> Result<(), BackendError> {
        self.runtime.version().await?;
        self.ensure_running().await
    }

    async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, BackendError> {
        self.ensure_running().await?;
        let name = self.config.name.clone();

        // Unique per run: concurrent runs share the container.
        let script_name = format!("/tmp/px_run_{}.py", Uuid::new_v4().simple());

        let script = tempfile::Builder::new()
            .prefix("px_run_")
            .suffix(".py")
            .tempfile()?;
        tokio::fs::write(script.path(), &request.code).await?;
        self.runtime
            .copy_in(&name, script.path(), &script_name)
            .await?;
        drop(script);

        let start = Instant::now();
        let env = [("PYTHONUNBUFFERED".to_string(), "1".to_string())];
        let exec_result = self
            .runtime
            .exec(
                &name,
                &["python", &script_name],
                &env,
                Some(request.timeout),
            )
            .await;

        let result = match exec_result {
            Ok(output) if output.timed_out => {
                tracing::warn!(
                    timeout = ?request.timeout,
                    "execution timed out, terminating in-container process"
                );
                // Killing the exec client does not kill the interpreter
                // inside the container; the script name scopes the kill
                // to this run. Best-effort: slim images may lack pkill.
                let _ = self
                    .runtime
                    .exec(&name, &["pkill", "-f", &script_name], &[], None)
                    .await;
                Ok(ExecutionResult::timeout(
                    output.stdout,
                    output.stderr,
                    start.elapsed(),
                ))
            }
            Ok(output) => Ok(ExecutionResult::from_output(
                output.exit_code,
                output.stdout,
                output.stderr,
                start.elapsed(),
            )),
            Err(e) => Err(BackendError::from(e)),
        };

        // The script never outlives the run, whatever happened above.
        if let Err(e) = self.runtime.remove_file(&name, &script_name).await {
            tracing::debug!(error = %e, "container script cleanup failed");
        }

        result
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        if self.config.keep_alive {
            tracing::debug!(name = %self.config.name, "keep_alive set, leaving container running");
            return Ok(());
        }

        match self.runtime.stop(&self.config.name).await {
            Ok(()) => Ok(()),
            Err(ContainerError::NotRunning(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
