// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sandbox factories wiring production adapters for CLI commands

use px_adapters::{
    ContainerPipAdapter, DockerAdapter, PipAdapter, TracedContainerAdapter, TracedPkgAdapter,
};
use px_core::SandboxConfig;
use px_engine::{ContainerBackend, LocalBackend, Sandbox, SharedRegistry};

pub type LocalSandbox = Sandbox<TracedPkgAdapter<PipAdapter>, LocalBackend>;

pub type ContainerSandbox = Sandbox<
    TracedPkgAdapter<ContainerPipAdapter<TracedContainerAdapter<DockerAdapter>>>,
    ContainerBackend<TracedContainerAdapter<DockerAdapter>>,
>;

/// Sandbox executing code as host interpreter processes, with packages
/// installed through the host pip.
pub fn make_local_sandbox(config: &SandboxConfig) -> LocalSandbox {
    let pkg = TracedPkgAdapter::new(PipAdapter::new(&config.python, config.install_timeout));
    let backend = LocalBackend::new(&config.python);
    Sandbox::new(pkg, SharedRegistry::new(), backend, config.max_attempts)
}

/// Sandbox executing code inside a long-lived container. The package
/// adapter and the backend share one runtime handle so `pip` runs in the
/// same container the code does.
pub fn make_container_sandbox(config: &SandboxConfig) -> ContainerSandbox {
    let runtime = TracedContainerAdapter::new(DockerAdapter::new());
    let pkg = TracedPkgAdapter::new(ContainerPipAdapter::new(
        runtime.clone(),
        &config.container.name,
        config.install_timeout,
    ));
    let backend = ContainerBackend::new(runtime, config.container.clone(), config.limits);
    Sandbox::new(pkg, SharedRegistry::new(), backend, config.max_attempts)
}
