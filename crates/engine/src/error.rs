// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use corral_config::ConfigError;
use corral_core::ModelError;
use corral_proc::ProcError;
use thiserror::Error;

/// Errors surfaced by the control surface (§4.G, §7).
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Proc(#[from] ProcError),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("identifier already registered: {0}")]
    AlreadyExists(String),

    #[error("service '{0}' reported an error and ignoreErrors is false")]
    ServiceReportedError(String),

    #[error("reload requested while {0} service(s) are running")]
    ReloadWhileRunning(usize),

    #[error("clear requested while {0} service(s) are running")]
    ClearWhileRunning(usize),
}
