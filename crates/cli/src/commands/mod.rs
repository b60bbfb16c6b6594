// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod deps;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Where the Python source comes from. Exactly one of the three.
#[derive(Args)]
pub struct SourceArgs {
    /// Python file to read
    pub file: Option<PathBuf>,

    /// Inline source text
    #[arg(short = 'c', long = "code", conflicts_with = "file")]
    pub code: Option<String>,

    /// Read source from stdin
    #[arg(long, conflicts_with_all = ["file", "code"])]
    pub stdin: bool,
}

impl SourceArgs {
    pub fn read(&self) -> Result<String> {
        if let Some(code) = &self.code {
            return Ok(code.clone());
        }
        if self.stdin {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                .context("failed to read source from stdin")?;
            return Ok(buf);
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        anyhow::bail!("no source given; pass a file, --code, or --stdin")
    }
}
