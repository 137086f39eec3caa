// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Service lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single service runtime instance.
///
/// Legal transitions form the language
/// `LOADED (STARTING (STARTED|ERROR)* STOPPING STOPPED)*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Descriptor is known but no process has ever run for it (or it was reloaded).
    Loaded,
    /// Process has been spawned; waiting for a started or error pattern match.
    Starting,
    /// At least one started-pattern line has matched.
    Started,
    /// At least one error-pattern line has matched. Still considered running.
    Error,
    /// Stop has been requested; tearing down the process tree.
    Stopping,
    /// Process has exited and teardown is complete.
    Stopped,
}

impl ServiceStatus {
    /// `true` for [`ServiceStatus::Started`] and [`ServiceStatus::Error`] —
    /// the process may still be up even though it reported an error.
    pub fn is_running(self) -> bool {
        matches!(self, ServiceStatus::Started | ServiceStatus::Error)
    }

    /// `true` only in the two states `run()` may legally be invoked from.
    pub fn can_start(self) -> bool {
        matches!(self, ServiceStatus::Loaded | ServiceStatus::Stopped)
    }

    /// Whether `status` may legally follow `self` directly.
    pub fn can_transition_to(self, next: ServiceStatus) -> bool {
        use ServiceStatus::*;
        matches!(
            (self, next),
            (Loaded, Starting)
                | (Stopped, Starting)
                | (Starting, Started)
                | (Starting, Error)
                | (Starting, Stopping)
                | (Started, Error)
                | (Started, Stopping)
                | (Error, Started)
                | (Error, Stopping)
                | (Stopping, Stopped)
        )
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Loaded => write!(f, "loaded"),
            ServiceStatus::Starting => write!(f, "starting"),
            ServiceStatus::Started => write!(f, "started"),
            ServiceStatus::Error => write!(f, "error"),
            ServiceStatus::Stopping => write!(f, "stopping"),
            ServiceStatus::Stopped => write!(f, "stopped"),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
