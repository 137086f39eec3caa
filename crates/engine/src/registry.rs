// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Process-wide name/alias registries (§4.F).

use crate::error::RuntimeError;
use crate::service::ServiceRuntime;
use corral_core::GroupDescriptor;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Name/alias → service and name/alias → group lookup tables.
#[derive(Default)]
pub struct Registry {
    services: Mutex<HashMap<String, Arc<ServiceRuntime>>>,
    groups: Mutex<HashMap<String, Arc<GroupDescriptor>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_service(&self, runtime: Arc<ServiceRuntime>) -> Result<(), RuntimeError> {
        let mut services = self.services.lock();
        for identifier in runtime.descriptor.identifiers() {
            if services.contains_key(identifier) {
                return Err(RuntimeError::AlreadyExists(identifier.to_string()));
            }
        }
        for identifier in runtime.descriptor.identifiers() {
            services.insert(identifier.to_string(), runtime.clone());
        }
        Ok(())
    }

    pub fn insert_group(&self, group: Arc<GroupDescriptor>) -> Result<(), RuntimeError> {
        let mut groups = self.groups.lock();
        for identifier in group.identifiers() {
            if groups.contains_key(identifier) {
                return Err(RuntimeError::AlreadyExists(identifier.to_string()));
            }
        }
        for identifier in group.identifiers() {
            groups.insert(identifier.to_string(), group.clone());
        }
        Ok(())
    }

    pub fn find_service(&self, identifier: &str) -> Option<Arc<ServiceRuntime>> {
        self.services.lock().get(identifier).cloned()
    }

    pub fn find_group(&self, identifier: &str) -> Option<Arc<GroupDescriptor>> {
        self.groups.lock().get(identifier).cloned()
    }

    pub fn services(&self) -> Vec<Arc<ServiceRuntime>> {
        let services = self.services.lock();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for runtime in services.values() {
            if seen.insert(Arc::as_ptr(runtime) as usize) {
                out.push(runtime.clone());
            }
        }
        out
    }

    pub fn groups(&self) -> Vec<Arc<GroupDescriptor>> {
        let groups = self.groups.lock();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for group in groups.values() {
            if seen.insert(Arc::as_ptr(group) as usize) {
                out.push(group.clone());
            }
        }
        out
    }

    pub fn running_count(&self) -> usize {
        self.services()
            .iter()
            .filter(|s| s.status().is_running())
            .count()
    }

    /// Drop every registered service and group. Only legal when nothing is
    /// currently running.
    pub fn clear(&self) -> Result<(), RuntimeError> {
        let running = self.running_count();
        if running > 0 {
            return Err(RuntimeError::ClearWhileRunning(running));
        }
        self.services.lock().clear();
        self.groups.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
