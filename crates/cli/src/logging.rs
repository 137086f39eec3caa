// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Logging setup (§6.1): an `EnvFilter`-driven `tracing` subscriber, optionally
//! redirected to a non-blocking rolling file appender.

use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Holds the non-blocking writer's flush guard for the process lifetime.
/// Dropping it early would silently truncate buffered log output.
pub struct LoggingGuard(#[allow(dead_code)] Option<tracing_appender::non_blocking::WorkerGuard>);

pub fn init(log_file: Option<&Path>) -> anyhow::Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("--log-file must name a file, got '{}'", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(non_blocking))
                .init();
            Ok(LoggingGuard(Some(guard)))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
            Ok(LoggingGuard(None))
        }
    }
}
