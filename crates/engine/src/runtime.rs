// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Control surface: the thin adapter any caller — CLI, REPL, test — drives
//! the supervisor through (§4.G).

use crate::error::RuntimeError;
use crate::orchestrator;
use crate::registry::Registry;
use crate::service::ServiceRuntime;
use corral_config::load;
use corral_core::{Configuration, ServiceStatus};
use std::path::Path;
use std::sync::Arc;

/// A point-in-time view of one service, as returned by [`Runtime::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub name: String,
    pub status: ServiceStatus,
    pub pid: Option<u32>,
}

/// Owns the registry and exposes `loadAll`/`reload`/`start`/`stop`/`status`
/// (§4.G). One `Runtime` is a fully independent, hermetic instance — no
/// process-wide statics.
pub struct Runtime {
    registry: Registry,
    ignore_errors: std::sync::atomic::AtomicBool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            ignore_errors: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Load and validate a configuration file, then populate the registry.
    /// Fails without mutating state if the file or graph is invalid.
    pub async fn load_all(&self, path: &Path) -> Result<(), RuntimeError> {
        self.load_all_with_overrides(path, corral_config::Overrides::default()).await
    }

    /// Like [`Runtime::load_all`], with `maxDepth`/`ignoreErrors` overrides
    /// applied on top of the file (§6.1's environment-variable precedence).
    pub async fn load_all_with_overrides(
        &self,
        path: &Path,
        overrides: corral_config::Overrides,
    ) -> Result<(), RuntimeError> {
        let config = load::load_file_with_overrides(path, overrides)?;
        self.load_configuration(config)
    }

    fn load_configuration(&self, config: Configuration) -> Result<(), RuntimeError> {
        self.ignore_errors
            .store(config.ignore_errors, std::sync::atomic::Ordering::SeqCst);
        for service in config.services {
            self.registry
                .insert_service(ServiceRuntime::new(Arc::new(service)))?;
        }
        for group in config.groups {
            self.registry.insert_group(Arc::new(group))?;
        }
        Ok(())
    }

    /// Reload: only permitted when nothing is running (§4.G, invariant 8).
    pub async fn reload(&self, path: &Path) -> Result<(), RuntimeError> {
        self.reload_with_overrides(path, corral_config::Overrides::default()).await
    }

    /// Like [`Runtime::reload`], with `maxDepth`/`ignoreErrors` overrides applied.
    pub async fn reload_with_overrides(
        &self,
        path: &Path,
        overrides: corral_config::Overrides,
    ) -> Result<(), RuntimeError> {
        let config = load::load_file_with_overrides(path, overrides)?;
        let running = self.registry.running_count();
        if running > 0 {
            return Err(RuntimeError::ReloadWhileRunning(running));
        }
        self.registry.clear()?;
        self.load_configuration(config)
    }

    pub async fn start_group(&self, name: &str) -> Result<(), RuntimeError> {
        let ignore_errors = self.ignore_errors.load(std::sync::atomic::Ordering::SeqCst);
        orchestrator::start_group(&self.registry, name, ignore_errors).await
    }

    pub async fn stop_group(&self, name: &str) -> Result<(), RuntimeError> {
        orchestrator::stop_group(&self.registry, name).await
    }

    pub async fn start_service(&self, name: &str) -> Result<(), RuntimeError> {
        let runtime = self
            .registry
            .find_service(name)
            .ok_or_else(|| RuntimeError::ServiceNotFound(name.to_string()))?;
        if runtime.begin() {
            runtime.run_started().await;
        }
        Ok(())
    }

    pub async fn stop_service(&self, name: &str) -> Result<(), RuntimeError> {
        let runtime = self
            .registry
            .find_service(name)
            .ok_or_else(|| RuntimeError::ServiceNotFound(name.to_string()))?;
        runtime.stop().await;
        Ok(())
    }

    /// Start a target, auto-detecting whether it names a group or a service
    /// (the CLI's `corral start <target>` does not ask the caller to say
    /// which). Groups are tried first since most targets name one.
    pub async fn start(&self, target: &str) -> Result<(), RuntimeError> {
        if self.registry.find_group(target).is_some() {
            self.start_group(target).await
        } else if self.registry.find_service(target).is_some() {
            self.start_service(target).await
        } else {
            Err(RuntimeError::ServiceNotFound(target.to_string()))
        }
    }

    /// Stop a target, auto-detecting group vs. service the same way
    /// [`Runtime::start`] does.
    pub async fn stop(&self, target: &str) -> Result<(), RuntimeError> {
        if self.registry.find_group(target).is_some() {
            self.stop_group(target).await
        } else if self.registry.find_service(target).is_some() {
            self.stop_service(target).await
        } else {
            Err(RuntimeError::ServiceNotFound(target.to_string()))
        }
    }

    /// Snapshot of one named service, every service in a named group, or
    /// every known service when `target` is `None`.
    pub fn status(&self, target: Option<&str>) -> Result<Vec<StatusSnapshot>, RuntimeError> {
        match target {
            Some(target) => {
                if let Some(group) = self.registry.find_group(target) {
                    return Ok(group
                        .services
                        .iter()
                        .filter_map(|name| self.registry.find_service(name))
                        .map(|r| snapshot(&r))
                        .collect());
                }
                let runtime = self
                    .registry
                    .find_service(target)
                    .ok_or_else(|| RuntimeError::ServiceNotFound(target.to_string()))?;
                Ok(vec![snapshot(&runtime)])
            }
            None => Ok(self.registry.services().iter().map(|r| snapshot(r)).collect()),
        }
    }

    /// Stop everything, in reverse dependency order, per §4.E.
    pub async fn shutdown_all(&self) -> Result<(), RuntimeError> {
        orchestrator::shutdown_all(&self.registry).await
    }
}

fn snapshot(runtime: &ServiceRuntime) -> StatusSnapshot {
    StatusSnapshot {
        name: runtime.descriptor.name.clone(),
        status: runtime.status(),
        pid: if runtime.status() == ServiceStatus::Started {
            runtime.pid()
        } else {
            None
        },
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
