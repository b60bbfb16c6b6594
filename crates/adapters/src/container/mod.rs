// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapters

mod docker;

pub use docker::DockerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ContainerCall, FakeContainerAdapter};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use px_core::ResourceLimits;
use thiserror::Error;

/// Errors from container runtime operations
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),
    #[error("image not found: {0}")]
    ImageNotFound(String),
    #[error("container not running: {0}")]
    NotRunning(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// Captured output of one exec inside a container.
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    /// `None` when the exec client was killed before reporting a status.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// True when the exec hit its wall-clock limit and was killed.
    pub timed_out: bool,
}

/// Adapter for the container runtime (docker)
#[async_trait]
pub trait ContainerAdapter: Clone + Send + Sync + 'static {
    /// Runtime version string; fails when the runtime is not installed.
    async fn version(&self) -> Result<String, ContainerError>;

    /// Whether the image exists locally.
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError>;

    /// Pull an image from the registry.
    async fn pull(&self, image: &str) -> Result<(), ContainerError>;

    /// Start a detached, long-lived container under the given name.
    /// Returns the container id.
    async fn run(
        &self,
        name: &str,
        image: &str,
        limits: &ResourceLimits,
        mount: Option<&Path>,
    ) -> Result<String, ContainerError>;

    /// Whether a container with this exact name is running.
    async fn is_running(&self, name: &str) -> Result<bool, ContainerError>;

    /// Copy a host file into the container.
    async fn copy_in(&self, name: &str, src: &Path, dest: &str) -> Result<(), ContainerError>;

    /// Run a command inside the container, optionally bounded by a
    /// wall-clock limit. On expiry the exec is killed and the output
    /// captured so far is returned with `timed_out` set.
    async fn exec(
        &self,
        name: &str,
        command: &[&str],
        env: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ContainerError>;

    /// Delete a file inside the container. Best-effort cleanup.
    async fn remove_file(&self, name: &str, path: &str) -> Result<(), ContainerError>;

    /// Stop the container.
    async fn stop(&self, name: &str) -> Result<(), ContainerError>;
}
