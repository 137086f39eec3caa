// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use thiserror::Error;

/// Errors raised while spawning, signaling, or tearing down a process.
#[derive(Debug, Error)]
pub enum ProcError {
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to send signal to pid {pid}: {source}")]
    SignalFailed {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run stop command '{command}': {source}")]
    StopCommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open stdin file {path}: {source}")]
    StdinFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process already exited")]
    AlreadyExited,
}
