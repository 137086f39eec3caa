// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Configuration loading: the "external collaborator" of §1 that turns raw
//! JSON/YAML bytes into a validated [`Configuration`]. This layer is
//! deliberately thin — format sniffing plus a direct handoff to the in-scope
//! validators (§4.A via `corral_core::Configuration::build`, §4.B via
//! `crate::graph::validate_all`).

use crate::error::ConfigError;
use crate::graph;
use crate::wire::ConfigFile;
use corral_core::{Configuration, GroupDescriptor, GroupSpec, ServiceDescriptor, ServiceSpec};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_extension(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedExtension(
                path.display().to_string(),
            )),
        }
    }
}

/// `maxDepth`/`ignoreErrors` overrides applied on top of whatever a config
/// file specifies, per the CLI's environment-variable precedence (§6.1).
#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    pub max_depth: Option<u32>,
    pub ignore_errors: Option<bool>,
}

/// Load, validate, and return a [`Configuration`] from a file on disk.
pub fn load_file(path: &Path) -> Result<Configuration, ConfigError> {
    load_file_with_overrides(path, Overrides::default())
}

/// Like [`load_file`], with `maxDepth`/`ignoreErrors` overrides applied
/// before graph validation runs.
pub fn load_file_with_overrides(path: &Path, overrides: Overrides) -> Result<Configuration, ConfigError> {
    let format = Format::from_extension(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_str_with_overrides(&text, format, overrides)
}

/// Parse and validate a configuration from an in-memory string, for tests
/// and embedded callers that already have the bytes.
pub fn load_str(text: &str, format: Format) -> Result<Configuration, ConfigError> {
    load_str_with_overrides(text, format, Overrides::default())
}

/// Like [`load_str`], with `maxDepth`/`ignoreErrors` overrides applied.
pub fn load_str_with_overrides(
    text: &str,
    format: Format,
    overrides: Overrides,
) -> Result<Configuration, ConfigError> {
    let file: ConfigFile = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    build_configuration(file, overrides)
}

fn build_configuration(file: ConfigFile, overrides: Overrides) -> Result<Configuration, ConfigError> {
    let services: Vec<ServiceDescriptor> = file
        .services
        .into_iter()
        .map(|s| {
            ServiceDescriptor::build(ServiceSpec {
                name: s.name,
                aliases: s.aliases,
                start_command: s.start,
                work_dir: s.work_dir,
                stdin_file: s.stdin,
                stop: s.stop,
                stop_timeout_secs: s.stop_timeout,
                stop_stdin_file: s.stop_stdin,
                started_patterns: s.started_patterns,
                error_patterns: s.error_patterns,
                color: s.color.map(|c| c.as_parseable_string()),
            })
        })
        .collect::<Result<_, _>>()?;

    let groups: Vec<GroupDescriptor> = file
        .groups
        .into_iter()
        .map(|g| {
            GroupDescriptor::build(GroupSpec {
                name: g.name,
                aliases: g.aliases,
                services: g.services,
                dependencies: g.dependencies,
            })
        })
        .collect::<Result<_, _>>()?;

    let max_depth = overrides
        .max_depth
        .or(file.max_depth)
        .unwrap_or(corral_core::DEFAULT_MAX_DEPTH);
    let ignore_errors = overrides.ignore_errors.or(file.ignore_errors).unwrap_or(false);

    let config = Configuration::build(services, groups, max_depth, ignore_errors)?;
    graph::validate_all(&config)?;

    Ok(config)
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
