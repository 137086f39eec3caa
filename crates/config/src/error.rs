// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use crate::graph::GraphError;
use corral_core::ModelError;
use thiserror::Error;

/// Errors raised while loading and validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized config extension for {0}: expected .json, .yaml, or .yml")]
    UnsupportedExtension(String),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
