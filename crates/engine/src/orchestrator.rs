// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Group orchestrator: dependency-ordered start, concurrent stop, and
//! coordinated shutdown (§4.E).

use crate::error::RuntimeError;
use crate::registry::Registry;
use crate::service::ServiceRuntime;
use corral_core::{GroupDescriptor, ServiceStatus};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Duration;

/// Grace period given to a group's worker pool before shutdown moves on to
/// the next level (§5 timeouts).
const GROUP_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Dependency-first order of every group reachable from `root` (deepest
/// dependency first, `root` last). Assumes the graph has already been
/// validated acyclic — this does not re-check depth or cycles.
fn dependency_order(registry: &Registry, root: &str) -> Result<Vec<Arc<GroupDescriptor>>, RuntimeError> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    visit(registry, root, &mut visited, &mut order)?;
    Ok(order)
}

fn visit(
    registry: &Registry,
    name: &str,
    visited: &mut HashSet<String>,
    order: &mut Vec<Arc<GroupDescriptor>>,
) -> Result<(), RuntimeError> {
    let group = registry
        .find_group(name)
        .ok_or_else(|| RuntimeError::GroupNotFound(name.to_string()))?;
    if !visited.insert(group.name.clone()) {
        return Ok(());
    }
    for dep in &group.dependencies {
        visit(registry, dep, visited, order)?;
    }
    order.push(group);
    Ok(())
}

/// Start `group_name` and, transitively, every group it depends on. Returns
/// once every not-yet-running service in the closure has reached STARTED
/// (or ERROR under `ignore_errors`) — or the first disallowed ERROR.
pub async fn start_group(
    registry: &Registry,
    group_name: &str,
    ignore_errors: bool,
) -> Result<(), RuntimeError> {
    for group in dependency_order(registry, group_name)? {
        start_one_group(registry, &group, ignore_errors).await?;
    }
    Ok(())
}

async fn start_one_group(
    registry: &Registry,
    group: &GroupDescriptor,
    ignore_errors: bool,
) -> Result<(), RuntimeError> {
    let mut pending = Vec::new();
    for service_ref in &group.services {
        let runtime = registry
            .find_service(service_ref)
            .ok_or_else(|| RuntimeError::ServiceNotFound(service_ref.clone()))?;
        // `begin` synchronously claims STARTING before the driver task is
        // spawned, so a barrier waiter subscribing right after never
        // observes a stale LOADED from a not-yet-scheduled task.
        if runtime.begin() {
            pending.push(runtime);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    let mut waiters = Vec::with_capacity(pending.len());
    for runtime in &pending {
        let runtime = runtime.clone();
        tokio::spawn({
            let runtime = runtime.clone();
            async move { runtime.run_started().await }
        });
        waiters.push(wait_for_barrier(runtime, ignore_errors));
    }

    for waiter in waiters {
        waiter.await?;
    }

    Ok(())
}

/// Wait until a freshly-started service clears the group barrier: it
/// reaches STARTED, or reaches ERROR while `ignore_errors` is set. Returns
/// an error the instant it reaches ERROR with `ignore_errors` unset.
async fn wait_for_barrier(runtime: Arc<ServiceRuntime>, ignore_errors: bool) -> Result<(), RuntimeError> {
    let mut status_rx = runtime.subscribe();
    loop {
        let status = *status_rx.borrow();
        match status {
            ServiceStatus::Started => return Ok(()),
            ServiceStatus::Error if ignore_errors => return Ok(()),
            ServiceStatus::Error => {
                return Err(RuntimeError::ServiceReportedError(
                    runtime.descriptor.name.clone(),
                ))
            }
            ServiceStatus::Stopped | ServiceStatus::Loaded => {
                // The process exited, or failed to spawn and reverted to
                // LOADED, before ever reaching a barrier-clearing status.
                // `begin` guarantees the watcher never observes this as the
                // pre-run LOADED of a not-yet-scheduled task.
                return Err(RuntimeError::ServiceReportedError(
                    runtime.descriptor.name.clone(),
                ));
            }
            _ => {
                if status_rx.changed().await.is_err() {
                    return Err(RuntimeError::ServiceReportedError(
                        runtime.descriptor.name.clone(),
                    ));
                }
            }
        }
    }
}

/// Stop every service in `group_name` concurrently, awaiting each until it
/// reaches STOPPED (bounded by its own `stopTimeoutSeconds` inside
/// [`ServiceRuntime::stop`]).
pub async fn stop_group(registry: &Registry, group_name: &str) -> Result<(), RuntimeError> {
    let group = registry
        .find_group(group_name)
        .ok_or_else(|| RuntimeError::GroupNotFound(group_name.to_string()))?;
    stop_group_services(registry, &group).await
}

async fn stop_group_services(registry: &Registry, group: &GroupDescriptor) -> Result<(), RuntimeError> {
    let mut handles = Vec::new();
    for service_ref in &group.services {
        let runtime = registry
            .find_service(service_ref)
            .ok_or_else(|| RuntimeError::ServiceNotFound(service_ref.clone()))?;
        let status = runtime.status();
        let live = matches!(
            status,
            ServiceStatus::Starting | ServiceStatus::Started | ServiceStatus::Error
        );
        if live {
            handles.push(tokio::spawn(async move { runtime.stop().await }));
        }
    }
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

/// Stop the entire group forest: reverse-level order (roots first in the
/// dependency graph are stopped last), each level bounded by a 5-second
/// grace before moving on (§4.E, §5).
pub async fn shutdown_all(registry: &Registry) -> Result<(), RuntimeError> {
    let levels = reverse_levels(registry)?;
    for level in levels {
        let level_future = async {
            for group in &level {
                stop_group_services(registry, group).await.ok();
            }
        };
        let _ = tokio::time::timeout(GROUP_SHUTDOWN_GRACE, level_future).await;
    }
    Ok(())
}

/// Groups bucketed by dependency depth from any root, deepest first so that
/// dependants are stopped before their dependencies.
fn reverse_levels(registry: &Registry) -> Result<Vec<Vec<Arc<GroupDescriptor>>>, RuntimeError> {
    let groups = registry.groups();
    let mut depth_of: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for group in &groups {
        compute_depth(registry, &group.name, &mut depth_of)?;
    }
    let max_depth = depth_of.values().copied().max().unwrap_or(0);
    let mut levels: Vec<Vec<Arc<GroupDescriptor>>> = vec![Vec::new(); max_depth + 1];
    for group in &groups {
        let depth = depth_of.get(&group.name).copied().unwrap_or(0);
        levels[depth].push(group.clone());
    }
    levels.reverse();
    Ok(levels)
}

fn compute_depth(
    registry: &Registry,
    name: &str,
    depth_of: &mut std::collections::HashMap<String, usize>,
) -> Result<usize, RuntimeError> {
    if let Some(depth) = depth_of.get(name) {
        return Ok(*depth);
    }
    let group = registry
        .find_group(name)
        .ok_or_else(|| RuntimeError::GroupNotFound(name.to_string()))?;
    let mut depth = 0;
    for dep in &group.dependencies {
        depth = depth.max(compute_depth(registry, dep, depth_of)? + 1);
    }
    depth_of.insert(group.name.clone(), depth);
    Ok(depth)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
