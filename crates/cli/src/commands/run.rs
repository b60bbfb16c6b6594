// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `px run [FILE | -c CODE | --stdin]` - Execute source in the sandbox

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use px_adapters::PkgAdapter;
use px_core::{BackendKind, ExecutionRequest, SandboxConfig};
use px_engine::{ExecutionBackend, Sandbox};

use super::SourceArgs;
use crate::adapters::{make_container_sandbox, make_local_sandbox};
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Backend to execute on (local or container)
    #[arg(long)]
    pub backend: Option<BackendKind>,

    /// Wall-clock execution limit in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Hard ceiling on execution attempts
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Interpreter executable (local backend and host pip)
    #[arg(long)]
    pub python: Option<String>,

    /// Container image
    #[arg(long)]
    pub image: Option<String>,

    /// Container name
    #[arg(long)]
    pub container: Option<String>,

    /// Leave the container running afterwards
    #[arg(long)]
    pub keep_alive: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn handle(args: RunArgs, mut config: SandboxConfig) -> Result<ExitCode> {
    apply_overrides(&args, &mut config);

    let code = args.source.read()?;
    let request = ExecutionRequest::new(code, config.run_timeout, config.backend)
        .with_limits(config.limits);

    match config.backend {
        BackendKind::Local => drive(make_local_sandbox(&config), &request, args.format).await,
        BackendKind::Container => {
            drive(make_container_sandbox(&config), &request, args.format).await
        }
    }
}

async fn drive<P: PkgAdapter, B: ExecutionBackend>(
    sandbox: Sandbox<P, B>,
    request: &ExecutionRequest,
    format: OutputFormat,
) -> Result<ExitCode> {
    sandbox.preflight().await?;

    let outcome = sandbox.run(request).await;
    // Shut down even when the run failed; the container may have started.
    if let Err(e) = sandbox.shutdown().await {
        tracing::warn!(error = %e, "backend shutdown failed");
    }
    let report = outcome?;

    output::print(&report, format);
    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Flags win over config file and environment.
fn apply_overrides(args: &RunArgs, config: &mut SandboxConfig) {
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(python) = &args.python {
        config.python = python.clone();
    }
    if let Some(secs) = args.timeout {
        config.run_timeout = Duration::from_secs(secs);
    }
    if let Some(n) = args.max_attempts {
        config.max_attempts = n;
    }
    if let Some(image) = &args.image {
        config.container.image = image.clone();
    }
    if let Some(name) = &args.container {
        config.container.name = name.clone();
    }
    if args.keep_alive {
        config.container.keep_alive = true;
    }
}
