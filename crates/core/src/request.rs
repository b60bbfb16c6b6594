// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution requests handed to a backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::limits::ResourceLimits;

/// Which execution environment runs the code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Fresh interpreter process on the host. No isolation beyond the
    /// process boundary.
    #[default]
    Local,
    /// Long-lived container shared by runs.
    Container,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Container => write!(f, "container"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "container" | "docker" => Ok(BackendKind::Container),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// One execution attempt. Built fresh per run, never persisted.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Python source to run, exactly as submitted.
    pub code: String,
    /// Wall-clock budget; the backend kills the process at expiry.
    pub timeout: Duration,
    pub backend_kind: BackendKind,
    pub limits: ResourceLimits,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, timeout: Duration, backend_kind: BackendKind) -> Self {
        Self {
            code: code.into(),
            timeout,
            backend_kind,
            limits: ResourceLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }
}
