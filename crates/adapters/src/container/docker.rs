// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker container adapter

use super::{ContainerAdapter, ContainerError, ExecOutput};
use async_trait::async_trait;
use px_core::ResourceLimits;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Docker-based container adapter, shelling out to the `docker` CLI.
#[derive(Clone, Default)]
pub struct DockerAdapter;

impl DockerAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn is_missing_container(stderr: &str) -> bool {
    stderr.contains("No such container") || stderr.contains("is not running")
}

#[async_trait]
impl ContainerAdapter for DockerAdapter {
    async fn version(&self) -> Result<String, ContainerError> {
        let output = Command::new("docker")
            .arg("--version")
            .output()
            .await
            .map_err(|e| ContainerError::RuntimeUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::RuntimeUnavailable(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        let output = Command::new("docker")
            .arg("image")
            .arg("inspect")
            .arg(image)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        Ok(output.status.success())
    }

    async fn pull(&self, image: &str) -> Result<(), ContainerError> {
        let output = Command::new("docker")
            .arg("pull")
            .arg(image)
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not found") || stderr.contains("manifest unknown") {
                return Err(ContainerError::ImageNotFound(image.to_string()));
            }
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(())
    }

    async fn run(
        &self,
        name: &str,
        image: &str,
        limits: &ResourceLimits,
        mount: Option<&Path>,
    ) -> Result<String, ContainerError> {
        let mut cmd = Command::new("docker");
        cmd.arg("run").arg("--name").arg(name).arg("-d").arg("--rm");

        for arg in limits.container_args() {
            cmd.arg(arg);
        }

        if let Some(dir) = mount {
            cmd.arg("-v")
                .arg(format!("{}:/app", dir.display()))
                .arg("-w")
                .arg("/app");
        }

        // Keep the container alive until an explicit stop.
        cmd.arg(image).arg("tail").arg("-f").arg("/dev/null");

        let output = cmd
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Unable to find image") {
                return Err(ContainerError::ImageNotFound(image.to_string()));
            }
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn is_running(&self, name: &str) -> Result<bool, ContainerError> {
        let output = Command::new("docker")
            .arg("ps")
            .arg("--filter")
            .arg(format!("name={name}"))
            .arg("--format")
            .arg("{{.Names}}")
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        // The name filter matches substrings, so compare exactly.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().any(|line| line.trim() == name))
    }

    async fn copy_in(&self, name: &str, src: &Path, dest: &str) -> Result<(), ContainerError> {
        let output = Command::new("docker")
            .arg("cp")
            .arg(src)
            .arg(format!("{name}:{dest}"))
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_missing_container(&stderr) {
                return Err(ContainerError::NotRunning(name.to_string()));
            }
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(())
    }

    async fn exec(
        &self,
        name: &str,
        command: &[&str],
        env: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ContainerError> {
        let mut cmd = Command::new("docker");
        cmd.arg("exec");
        for (key, value) in env {
            cmd.arg("-e").arg(format!("{key}={value}"));
        }
        cmd.arg(name);
        cmd.args(command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        // Drain both pipes concurrently so the exec never blocks on a full
        // pipe buffer, and so partial output survives a timeout kill.
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

        let waited = match timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait()).await,
            None => Ok(child.wait().await),
        };

        match waited {
            Ok(Ok(status)) => {
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                if !status.success() && is_missing_container(&stderr) {
                    return Err(ContainerError::NotRunning(name.to_string()));
                }
                Ok(ExecOutput {
                    exit_code: status.code(),
                    stdout,
                    stderr,
                    timed_out: false,
                })
            }
            Ok(Err(e)) => Err(ContainerError::CommandFailed(e.to_string())),
            Err(_) => {
                // Kills the exec client only; the in-container process is
                // the caller's to clean up.
                let _ = child.kill().await;
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                Ok(ExecOutput {
                    exit_code: None,
                    stdout,
                    stderr,
                    timed_out: true,
                })
            }
        }
    }

    async fn remove_file(&self, name: &str, path: &str) -> Result<(), ContainerError> {
        let output = Command::new("docker")
            .arg("exec")
            .arg(name)
            .arg("rm")
            .arg("-f")
            .arg(path)
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_missing_container(&stderr) {
                return Err(ContainerError::NotRunning(name.to_string()));
            }
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<(), ContainerError> {
        let output = Command::new("docker")
            .arg("stop")
            .arg(name)
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_missing_container(&stderr) {
                return Err(ContainerError::NotRunning(name.to_string()));
            }
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(())
    }
}
