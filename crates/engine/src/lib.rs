// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pyxis execution engine: dependency resolution, installation, and
//! sandboxed execution backends behind one orchestrator.

mod backend;
mod error;
mod installer;
mod registry;
mod resolver;
mod sandbox;

pub use backend::{BackendError, ContainerBackend, ExecutionBackend, LocalBackend};
pub use error::SetupError;
pub use installer::PackageInstaller;
pub use registry::{PackageRegistry, SharedRegistry};
pub use resolver::DependencyResolver;
pub use sandbox::Sandbox;
