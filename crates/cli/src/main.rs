// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! corral - a developer-workstation process supervisor

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod commands;
mod env;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use corral_engine::Runtime;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corral", version, about = "Start, stop, and watch groups of local dev processes")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Redirect logging to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Output format for `status`
    #[arg(short = 'o', long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file into a fresh registry
    Load,
    /// Reload the configuration file (fails if anything is running)
    Reload,
    /// Start a service or group, then hold the foreground until interrupted
    Start {
        /// Service or group name (or alias)
        target: String,
    },
    /// Stop a service or group by name
    Stop {
        /// Service or group name (or alias)
        target: String,
    },
    /// Show status for one target, or everything if omitted
    Status {
        /// Service or group name (or alias)
        target: Option<String>,
    },
    /// Stop every running service, dependants before dependencies
    Shutdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    let config_path = env::resolve_config_path(cli.config.clone())?;
    let overrides = env::overrides_from_env();
    let runtime = Runtime::new();

    match cli.command {
        Commands::Load => commands::load(&runtime, &config_path, overrides).await,
        Commands::Reload => commands::reload(&runtime, &config_path, overrides).await,
        Commands::Start { target } => {
            runtime.load_all_with_overrides(&config_path, overrides).await?;
            commands::start(&runtime, &target).await?;
            // No daemon or IPC transport: this process *is* the supervisor
            // for what it just started. Hold the foreground and tear
            // everything down on interrupt (§6's "Exit: causes shutdownAll()
            // then terminates").
            tokio::signal::ctrl_c().await?;
            commands::shutdown(&runtime).await
        }
        Commands::Stop { target } => {
            runtime.load_all_with_overrides(&config_path, overrides).await?;
            commands::stop(&runtime, &target).await
        }
        Commands::Status { target } => {
            runtime.load_all_with_overrides(&config_path, overrides).await?;
            commands::status(&runtime, target.as_deref(), cli.output).await
        }
        Commands::Shutdown => {
            runtime.load_all_with_overrides(&config_path, overrides).await?;
            commands::shutdown(&runtime).await
        }
    }
}
