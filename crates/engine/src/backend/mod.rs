// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution backends: where the code actually runs

mod container;
mod local;

pub use container::ContainerBackend;
pub use local::LocalBackend;

#[cfg(test)]
mod fake;
#[cfg(test)]
pub use fake::FakeBackend;

use async_trait::async_trait;
use px_adapters::ContainerError;
use px_core::{BackendKind, ExecutionRequest, ExecutionResult};
use thiserror::Error;

/// Setup or spawn failures of a backend.
///
/// Failures of the executed code itself are never errors; they land in
/// the `ExecutionResult`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("interpreter unavailable: {0}")]
    InterpreterUnavailable(String),
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A place to run untrusted code.
#[async_trait]
pub trait ExecutionBackend: Clone + Send + Sync + 'static {
    fn kind(&self) -> BackendKind;

    /// Verify the backend can run anything at all, before the first
    /// attempt. Cheap enough to call on every CLI invocation.
    async fn preflight(&self) -> Result<(), BackendError>;

    /// Run the code to completion or timeout. On timeout the process is
    /// killed and the partial output is returned, never an error.
    async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, BackendError>;

    /// Release long-lived resources (the local backend has none).
    async fn shutdown(&self) -> Result<(), BackendError>;
}
