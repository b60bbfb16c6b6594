// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use crate::BackendError;
use px_adapters::PkgError;
use thiserror::Error;

/// Failures before any execution attempt was made.
///
/// Everything after setup (install failures, runtime errors, timeouts) is
/// captured in the `RunReport` instead of surfacing as an error.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("backend unavailable: {0}")]
    Backend(#[from] BackendError),
    #[error("package registry unavailable: {0}")]
    Registry(#[from] PkgError),
}
