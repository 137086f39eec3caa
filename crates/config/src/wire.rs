// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Wire schema for the configuration file (§6). This is
//! deliberately thin: a `serde`-derived mirror of the JSON/YAML shape with no
//! validation of its own. Everything that matters — identifier syntax, regex
//! compilation, uniqueness, DAG/depth soundness — happens in
//! [`crate::load::load_configuration`] by handing the parsed shape to
//! `corral-core` and `crate::graph`.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub services: Vec<ServiceWire>,
    #[serde(default)]
    pub groups: Vec<GroupWire>,
    #[serde(rename = "maxDepth", default)]
    pub max_depth: Option<u32>,
    #[serde(rename = "ignoreErrors", default)]
    pub ignore_errors: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceWire {
    pub name: String,
    pub start: String,
    pub stop: Option<String>,
    #[serde(rename = "stopTimeout")]
    pub stop_timeout: Option<u64>,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub color: Option<ColorWire>,
    #[serde(rename = "workDir")]
    pub work_dir: Option<PathBuf>,
    #[serde(rename = "startedPatterns", default)]
    pub started_patterns: Vec<String>,
    #[serde(rename = "errorPatterns", default)]
    pub error_patterns: Vec<String>,
    pub stdin: Option<PathBuf>,
    #[serde(rename = "stopStdin")]
    pub stop_stdin: Option<PathBuf>,
}

/// Color may be given as a JSON/YAML integer or as a string, per §6.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColorWire {
    Int(i64),
    Str(String),
}

impl ColorWire {
    pub fn as_parseable_string(&self) -> String {
        match self {
            ColorWire::Int(n) => n.to_string(),
            ColorWire::Str(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupWire {
    pub name: String,
    pub services: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}
