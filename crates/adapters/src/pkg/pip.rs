// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host pip adapter

use super::{InstallOutput, PkgAdapter, PkgError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::process::Command;

/// Runs pip through the configured interpreter (`python -m pip`), so the
/// packages land in the environment that will execute the code.
#[derive(Clone)]
pub struct PipAdapter {
    python: String,
    install_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
    version: String,
}

impl PipAdapter {
    pub fn new(python: impl Into<String>, install_timeout: Duration) -> Self {
        Self {
            python: python.into(),
            install_timeout,
        }
    }
}

#[async_trait]
impl PkgAdapter for PipAdapter {
    async fn install(&self, package: &str) -> Result<InstallOutput, PkgError> {
        let mut command = Command::new(&self.python);
        command
            .arg("-m")
            .arg("pip")
            .arg("install")
            .arg("--no-cache-dir")
            .arg("--disable-pip-version-check")
            .arg(package)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.install_timeout, command.output())
            .await
            .map_err(|_| PkgError::InstallTimeout(self.install_timeout.as_secs()))?
            .map_err(|e| PkgError::CommandFailed(e.to_string()))?;

        Ok(InstallOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn list_installed(&self) -> Result<HashMap<String, String>, PkgError> {
        let output = Command::new(&self.python)
            .arg("-m")
            .arg("pip")
            .arg("list")
            .arg("--format=json")
            .arg("--disable-pip-version-check")
            .output()
            .await
            .map_err(|e| PkgError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PkgError::CommandFailed(stderr.to_string()));
        }

        parse_pip_list(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `pip list --format=json` output into lowercased name -> version.
pub(crate) fn parse_pip_list(json: &str) -> Result<HashMap<String, String>, PkgError> {
    let entries: Vec<PipListEntry> =
        serde_json::from_str(json).map_err(|e| PkgError::BadListOutput(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| (entry.name.to_lowercase(), entry.version))
        .collect())
}
