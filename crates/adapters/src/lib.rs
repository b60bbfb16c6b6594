// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod container;
pub mod pkg;
pub mod traced;

pub use container::{ContainerAdapter, ContainerError, DockerAdapter, ExecOutput};
pub use pkg::{ContainerPipAdapter, InstallOutput, PipAdapter, PkgAdapter, PkgError};
pub use traced::{TracedContainerAdapter, TracedPkgAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use container::{ContainerCall, FakeContainerAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use pkg::{FakePkgAdapter, PkgCall};
