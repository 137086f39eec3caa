// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Subcommand handlers: thin wrappers over `corral_engine::Runtime` (§4.G).

use crate::output::{self, OutputFormat};
use corral_engine::Runtime;
use std::path::Path;
use tracing::info;

pub async fn load(runtime: &Runtime, path: &Path, overrides: corral_config::Overrides) -> anyhow::Result<()> {
    runtime.load_all_with_overrides(path, overrides).await?;
    info!(config = %path.display(), "loaded configuration");
    println!("loaded {}", path.display());
    Ok(())
}

pub async fn reload(runtime: &Runtime, path: &Path, overrides: corral_config::Overrides) -> anyhow::Result<()> {
    runtime.reload_with_overrides(path, overrides).await?;
    info!(config = %path.display(), "reloaded configuration");
    println!("reloaded {}", path.display());
    Ok(())
}

pub async fn start(runtime: &Runtime, target: &str) -> anyhow::Result<()> {
    runtime.start(target).await?;
    info!(target, "start requested");
    println!("started {target}");
    Ok(())
}

pub async fn stop(runtime: &Runtime, target: &str) -> anyhow::Result<()> {
    runtime.stop(target).await?;
    info!(target, "stop requested");
    println!("stopped {target}");
    Ok(())
}

pub async fn status(runtime: &Runtime, target: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let snapshots = runtime.status(target)?;
    output::print_status(&snapshots, format)
}

pub async fn shutdown(runtime: &Runtime) -> anyhow::Result<()> {
    runtime.shutdown_all().await?;
    info!("shutdown complete");
    println!("shut down");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
