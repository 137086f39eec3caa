// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Centralized environment variable access for the CLI crate.

use corral_config::Overrides;
use std::path::PathBuf;

/// Resolve the config path: `--config` flag > `CORRAL_CONFIG` > `./corral.yaml`/`./corral.json`.
pub fn resolve_config_path(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("CORRAL_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    for candidate in ["corral.yaml", "corral.yml", "corral.json"] {
        let path = PathBuf::from(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    anyhow::bail!(
        "no config file found: pass --config, set CORRAL_CONFIG, or place a corral.yaml/corral.json in the current directory"
    )
}

/// `maxDepth`/`ignoreErrors` overrides from `CORRAL_MAX_DEPTH` / `CORRAL_IGNORE_ERRORS`.
pub fn overrides_from_env() -> Overrides {
    Overrides {
        max_depth: std::env::var("CORRAL_MAX_DEPTH")
            .ok()
            .and_then(|s| s.parse::<u32>().ok()),
        ignore_errors: std::env::var("CORRAL_IGNORE_ERRORS")
            .ok()
            .and_then(|s| parse_bool(&s)),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
