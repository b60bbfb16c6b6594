// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! px-core: Core library for the Pyxis (px) sandbox
//!
//! This crate provides:
//! - Static analysis of Python source (imports, structural syntax checks)
//! - The builtin-module and import-alias classification tables
//! - Execution requests, results, and the failure taxonomy
//! - Retry bookkeeping and resource limits
//! - Sandbox configuration (TOML + environment)

pub mod aliases;
pub mod analyze;
pub mod builtins;
pub mod config;
pub mod limits;
pub mod outcome;
pub mod report;
pub mod request;
pub mod retry;
pub mod stderr;

// Re-exports
pub use aliases::PackageSpec;
pub use analyze::{AnalyzeError, Classification, ImportSet, SourceAnalyzer};
pub use config::{ConfigError, ContainerConfig, SandboxConfig};
pub use limits::{NetworkMode, ResourceLimits};
pub use outcome::{ErrorKind, ExecutionResult};
pub use report::{DependencyReport, InstallationResult, InstalledPackage, RunReport};
pub use request::{BackendKind, ExecutionRequest};
pub use retry::{RetryState, DEFAULT_MAX_ATTEMPTS};
