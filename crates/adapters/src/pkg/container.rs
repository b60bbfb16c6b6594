// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pip-in-container adapter

use super::pip::parse_pip_list;
use super::{InstallOutput, PkgAdapter, PkgError};
use crate::container::ContainerAdapter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Runs pip inside the sandbox container, so installed packages are
/// visible to the interpreter that executes the code there.
#[derive(Clone)]
pub struct ContainerPipAdapter<C> {
    runtime: C,
    container: String,
    install_timeout: Duration,
}

impl<C> ContainerPipAdapter<C> {
    pub fn new(runtime: C, container: impl Into<String>, install_timeout: Duration) -> Self {
        Self {
            runtime,
            container: container.into(),
            install_timeout,
        }
    }
}

#[async_trait]
impl<C: ContainerAdapter> PkgAdapter for ContainerPipAdapter<C> {
    async fn install(&self, package: &str) -> Result<InstallOutput, PkgError> {
        let command = [
            "python",
            "-m",
            "pip",
            "install",
            "--no-cache-dir",
            "--disable-pip-version-check",
            package,
        ];
        let output = self
            .runtime
            .exec(&self.container, &command, &[], Some(self.install_timeout))
            .await
            .map_err(|e| PkgError::CommandFailed(e.to_string()))?;

        if output.timed_out {
            return Err(PkgError::InstallTimeout(self.install_timeout.as_secs()));
        }

        Ok(InstallOutput {
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    async fn list_installed(&self) -> Result<HashMap<String, String>, PkgError> {
        let command = [
            "python",
            "-m",
            "pip",
            "list",
            "--format=json",
            "--disable-pip-version-check",
        ];
        let output = self
            .runtime
            .exec(&self.container, &command, &[], None)
            .await
            .map_err(|e| PkgError::CommandFailed(e.to_string()))?;

        if output.exit_code != Some(0) {
            return Err(PkgError::CommandFailed(output.stderr));
        }

        parse_pip_list(&output.stdout)
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
