// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Top-level configuration (§3): the set of services and groups plus the
//! two cross-cutting policy knobs. Construction enforces the uniqueness
//! invariants of §3 ("Uniqueness invariants") — name/alias uniqueness is
//! checked here because it spans the whole collection, not a single
//! descriptor; reference and DAG validity (§4.B) is a separate concern
//! handled by `corral-config`.

use crate::error::ModelError;
use crate::group::GroupDescriptor;
use crate::service::ServiceDescriptor;
use std::collections::HashSet;

/// A fully validated, immutable snapshot of services, groups, and policy.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub services: Vec<ServiceDescriptor>,
    pub groups: Vec<GroupDescriptor>,
    pub max_depth: u32,
    pub ignore_errors: bool,
}

impl Configuration {
    pub fn build(
        services: Vec<ServiceDescriptor>,
        groups: Vec<GroupDescriptor>,
        max_depth: u32,
        ignore_errors: bool,
    ) -> Result<Self, ModelError> {
        if max_depth < 1 {
            return Err(ModelError::InvalidMaxDepth(max_depth));
        }

        let mut seen = HashSet::new();
        for svc in &services {
            for id in svc.identifiers() {
                if !seen.insert(id.to_string()) {
                    return Err(ModelError::DuplicateServiceIdentifier(id.to_string()));
                }
            }
        }

        let mut seen = HashSet::new();
        for grp in &groups {
            for id in grp.identifiers() {
                if !seen.insert(id.to_string()) {
                    return Err(ModelError::DuplicateGroupIdentifier(id.to_string()));
                }
            }
        }

        Ok(Configuration {
            services,
            groups,
            max_depth,
            ignore_errors,
        })
    }

    pub fn find_service(&self, identifier: &str) -> Option<&ServiceDescriptor> {
        self.services
            .iter()
            .find(|svc| svc.identifiers().any(|id| id == identifier))
    }

    pub fn find_group(&self, identifier: &str) -> Option<&GroupDescriptor> {
        self.groups
            .iter()
            .find(|grp| grp.identifiers().any(|id| id == identifier))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
