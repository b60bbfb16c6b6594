// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local-process backend

use super::{BackendError, ExecutionBackend};
use async_trait::async_trait;
use px_core::{BackendKind, ExecutionRequest, ExecutionResult};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Runs code in a fresh interpreter process on the host.
///
/// No isolation beyond the process boundary: the code sees the host
/// filesystem and network. The container backend is the isolated one.
#[derive(Clone)]
pub struct LocalBackend {
    python: String,
}

impl LocalBackend {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

#[async_trait]
impl ExecutionBackend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn preflight(&self) -> Result<(), BackendError> {
        let output = Command::new(&self.python)
            .arg("--version")
            .output()
            .await
            .map_err(|e| {
                BackendError::InterpreterUnavailable(format!("{}: {e}", self.python))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::InterpreterUnavailable(format!(
                "{}: {}",
                self.python,
                stderr.trim()
            )));
        }

        Ok(())
    }

    async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, BackendError> {
        // The script lives only as long as this call; the guard removes it
        // on every exit path.
        let script = tempfile::Builder::new()
            .prefix("px_run_")
            .suffix(".py")
            .tempfile()?;
        tokio::fs::write(script.path(), &request.code).await?;

        let start = Instant::now();
        let mut child = Command::new(&self.python)
            .arg(script.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut pipe) = stdout_pipe {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });

        match tokio::time::timeout(request.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                Ok(ExecutionResult::from_output(
                    status.code(),
                    stdout,
                    stderr,
                    start.elapsed(),
                ))
            }
            Ok(Err(e)) => Err(BackendError::Io(e)),
            Err(_) => {
                tracing::warn!(
                    timeout = ?request.timeout,
                    "execution timed out, killing process"
                );
                let _ = child.kill().await;
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                Ok(ExecutionResult::timeout(stdout, stderr, start.elapsed()))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
