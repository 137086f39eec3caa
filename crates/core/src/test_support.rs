// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Builders shared by other crates' tests. Only compiled under `#[cfg(test)]`
//! or the `test-support` feature.

use crate::group::{GroupDescriptor, GroupSpec};
use crate::service::{ServiceDescriptor, ServiceSpec};

/// Build a minimal valid service with the given name and start command.
pub fn service(name: &str, start_command: &str) -> ServiceDescriptor {
    ServiceDescriptor::build(ServiceSpec {
        name: name.to_string(),
        start_command: start_command.to_string(),
        ..Default::default()
    })
    .expect("test-support service spec should be valid")
}

/// Build a minimal valid service with started/error patterns.
pub fn service_with_patterns(
    name: &str,
    start_command: &str,
    started_patterns: &[&str],
    error_patterns: &[&str],
) -> ServiceDescriptor {
    ServiceDescriptor::build(ServiceSpec {
        name: name.to_string(),
        start_command: start_command.to_string(),
        started_patterns: started_patterns.iter().map(|s| s.to_string()).collect(),
        error_patterns: error_patterns.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    })
    .expect("test-support service spec should be valid")
}

/// Build a minimal valid group referencing the given services.
pub fn group(name: &str, services: &[&str]) -> GroupDescriptor {
    GroupDescriptor::build(GroupSpec {
        name: name.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    })
    .expect("test-support group spec should be valid")
}

/// Build a group with dependencies on other groups.
pub fn group_with_deps(name: &str, services: &[&str], deps: &[&str]) -> GroupDescriptor {
    GroupDescriptor::build(GroupSpec {
        name: name.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
        dependencies: deps.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    })
    .expect("test-support group spec should be valid")
}
