// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource limits applied to sandboxed execution.
//!
//! The container backend enforces these at container create time; the
//! local backend cannot enforce them and ignores them.

use serde::{Deserialize, Serialize};

/// Network access granted to the sandbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// No network; package installs must happen before cutover or fail.
    None,
    /// Default container networking.
    #[default]
    Bridge,
}

impl NetworkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::None => "none",
            NetworkMode::Bridge => "bridge",
        }
    }
}

/// Resource limits for a sandbox container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    /// Memory ceiling in megabytes.
    pub memory_mb: u64,
    /// CPU quota; 1.0 is one full core.
    pub cpus: f64,
    pub network: NetworkMode,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            memory_mb: 512,
            cpus: 1.0,
            network: NetworkMode::Bridge,
        }
    }
}

impl ResourceLimits {
    /// Tight limits suitable for tests.
    pub fn for_testing() -> Self {
        Self {
            memory_mb: 64,
            cpus: 0.5,
            network: NetworkMode::None,
        }
    }

    /// Render as `docker run` flags.
    pub fn container_args(&self) -> Vec<String> {
        vec![
            "--memory".to_string(),
            format!("{}m", self.memory_mb),
            "--cpus".to_string(),
            format!("{}", self.cpus),
            "--network".to_string(),
            self.network.as_str().to_string(),
        ]
    }
}
