// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! px - Pyxis sandboxed Python runner

mod adapters;
mod commands;
mod completions;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{deps, run};
use px_core::SandboxConfig;

#[derive(Parser)]
#[command(
    name = "px",
    version,
    about = "Pyxis - run Python code in a dependency-resolving sandbox"
)]
struct Cli {
    /// Config file (default: ./px.toml, then ~/.config/px/px.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute Python source in the sandbox
    Run(run::RunArgs),
    /// Report required, installed, and missing packages without executing
    Deps(deps::DepsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => {
            let config = load_config(cli.config.as_deref())?;
            run::handle(args, config).await
        }
        Commands::Deps(args) => {
            let config = load_config(cli.config.as_deref())?;
            deps::handle(args, config).await
        }
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Stderr logging, filtered by `PX_LOG`. Stdout is reserved for results.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("PX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(flag: Option<&Path>) -> Result<SandboxConfig> {
    let mut config = match config_path(flag) {
        Some(path) => SandboxConfig::load(&path)?,
        None => SandboxConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}

/// An explicit `--config` must exist; the discovered locations are
/// skipped silently when absent.
fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }
    let local = Path::new("px.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }
    let global = dirs::config_dir()?.join("px/px.toml");
    global.exists().then_some(global)
}
