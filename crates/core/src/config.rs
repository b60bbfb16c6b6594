// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sandbox configuration: TOML file, environment overrides, defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::limits::ResourceLimits;
use crate::request::BackendKind;
use crate::retry::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {name}: {detail}")]
    Env { name: String, detail: String },
}

/// Container-backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Image the sandbox container runs.
    pub image: String,
    /// Container name. Random per config so unrelated runs do not share
    /// a sandbox unless configured to.
    pub name: String,
    /// Leave the container running after shutdown.
    pub keep_alive: bool,
    /// Mount the working directory at /app inside the container.
    pub mount_workdir: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            image: "python:3.9-slim".to_string(),
            name: format!("px-sandbox-{}", &suffix[..8]),
            keep_alive: false,
            mount_workdir: true,
        }
    }
}

/// Full sandbox configuration.
///
/// Every field has a default; a missing file and an empty file mean the
/// same thing. Durations are humantime strings (`"30s"`, `"2m"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub backend: BackendKind,
    /// Interpreter executable for the local backend and host pip.
    pub python: String,
    /// Hard ceiling on execution attempts per run.
    pub max_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub run_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub install_timeout: Duration,
    pub container: ContainerConfig,
    pub limits: ResourceLimits,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            python: "python3".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            run_timeout: Duration::from_secs(30),
            install_timeout: Duration::from_secs(120),
            container: ContainerConfig::default(),
            limits: ResourceLimits::default(),
        }
    }
}

impl SandboxConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SandboxConfig =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded sandbox config");
        Ok(config)
    }

    /// Apply `PX_*` environment overrides on top of the current values.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override from a variable source. Split from [`Self::apply_env`] so
    /// tests never mutate process environment.
    pub fn apply_vars(
        &mut self,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = get("PX_BACKEND") {
            self.backend = value.parse().map_err(|detail| ConfigError::Env {
                name: "PX_BACKEND".into(),
                detail,
            })?;
        }
        if let Some(value) = get("PX_PYTHON") {
            self.python = value;
        }
        if let Some(value) = get("PX_MAX_ATTEMPTS") {
            self.max_attempts = value.parse().map_err(|_| ConfigError::Env {
                name: "PX_MAX_ATTEMPTS".into(),
                detail: format!("'{value}' is not a number"),
            })?;
        }
        if let Some(value) = get("PX_RUN_TIMEOUT") {
            self.run_timeout = parse_duration("PX_RUN_TIMEOUT", &value)?;
        }
        if let Some(value) = get("PX_INSTALL_TIMEOUT") {
            self.install_timeout = parse_duration("PX_INSTALL_TIMEOUT", &value)?;
        }
        if let Some(value) = get("PX_IMAGE") {
            self.container.image = value;
        }
        if let Some(value) = get("PX_CONTAINER_NAME") {
            self.container.name = value;
        }
        Ok(())
    }
}

fn parse_duration(name: &str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::Env {
        name: name.to_string(),
        detail: format!("'{value}': {e}"),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
