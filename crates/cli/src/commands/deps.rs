// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `px deps [FILE | -c CODE | --stdin]` - Dependency report without executing

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use px_adapters::{PipAdapter, TracedPkgAdapter};
use px_core::{SandboxConfig, SourceAnalyzer};
use px_engine::{DependencyResolver, SharedRegistry};

use super::SourceArgs;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Interpreter whose installed packages are checked
    #[arg(long)]
    pub python: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Always queries the host pip; the report describes what a local run
/// would need, whether or not a container backend is configured.
pub async fn handle(args: DepsArgs, mut config: SandboxConfig) -> Result<ExitCode> {
    if let Some(python) = &args.python {
        config.python = python.clone();
    }
    let code = args.source.read()?;

    let imports = match SourceAnalyzer::new().analyze(&code) {
        Ok(imports) => imports,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let pkg = TracedPkgAdapter::new(PipAdapter::new(&config.python, config.install_timeout));
    let resolver = DependencyResolver::new(pkg, SharedRegistry::new());
    let report = resolver
        .resolve(&imports)
        .await
        .context("querying installed packages")?;

    output::print(&report, args.format);
    Ok(ExitCode::SUCCESS)
}
