// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Dependency graph validation (§4.B).
//!
//! A depth-first walk from the requested root, coloring nodes white/gray/
//! black. A gray neighbor means a cycle. Depth is the length of the current
//! gray frontier (the chain of ancestors still on the stack); the walk fails
//! the moment that length would exceed `maxDepth`. This is a plain recursive
//! max-depth computation (`1 + max(depth(dep))`) — see DESIGN.md, Open
//! Question 2.

use corral_core::Configuration;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("circular dependency detected at group '{0}'")]
    CircularDependency(String),

    #[error("group '{group}' exceeds max depth {max_depth} (depth {depth})")]
    MaxDepthExceeded {
        group: String,
        depth: u32,
        max_depth: u32,
    },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Validate the subgraph rooted at `root`: acyclic, every reference resolves,
/// depth within `config.max_depth`.
pub fn validate(config: &Configuration, root: &str) -> Result<(), GraphError> {
    let root_group = config
        .find_group(root)
        .ok_or_else(|| GraphError::GroupNotFound(root.to_string()))?;

    let mut colors: HashMap<String, Color> = HashMap::new();
    walk(config, &root_group.name, 1, &mut colors)
}

/// Run [`validate`] against every declared group. The first failure aborts
/// without validating the remainder, matching the "load-all" semantics of
/// §4.B: no runtime state is mutated on failure.
pub fn validate_all(config: &Configuration) -> Result<(), GraphError> {
    for group in &config.groups {
        validate(config, &group.name)?;
    }
    Ok(())
}

fn walk(
    config: &Configuration,
    name: &str,
    depth: u32,
    colors: &mut HashMap<String, Color>,
) -> Result<(), GraphError> {
    if depth > config.max_depth {
        return Err(GraphError::MaxDepthExceeded {
            group: name.to_string(),
            depth,
            max_depth: config.max_depth,
        });
    }

    let group = config
        .find_group(name)
        .ok_or_else(|| GraphError::GroupNotFound(name.to_string()))?;

    for service_ref in &group.services {
        if config.find_service(service_ref).is_none() {
            return Err(GraphError::ServiceNotFound(service_ref.clone()));
        }
    }

    colors.insert(group.name.clone(), Color::Gray);

    for dep_ref in &group.dependencies {
        let dep_group = config
            .find_group(dep_ref)
            .ok_or_else(|| GraphError::GroupNotFound(dep_ref.clone()))?;

        match colors.get(&dep_group.name) {
            Some(Color::Gray) => return Err(GraphError::CircularDependency(dep_group.name.clone())),
            Some(Color::Black) => continue,
            _ => walk(config, &dep_group.name, depth + 1, colors)?,
        }
    }

    colors.insert(group.name.clone(), Color::Black);
    Ok(())
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
