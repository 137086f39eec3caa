// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Validation errors raised while building descriptors (§4.A).

use thiserror::Error;

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid identifier '{0}': must match {pattern}", pattern = crate::IDENTIFIER_PATTERN)]
    InvalidIdentifier(String),

    #[error("duplicate service identifier: {0}")]
    DuplicateServiceIdentifier(String),

    #[error("duplicate group identifier: {0}")]
    DuplicateGroupIdentifier(String),

    #[error("group '{0}' must reference at least one service")]
    EmptyGroup(String),

    #[error("stop timeout must be >= 1 second, got {0}")]
    InvalidStopTimeout(u64),

    #[error("maxDepth must be >= 1, got {0}")]
    InvalidMaxDepth(u32),

    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("unknown stop signal '{0}'")]
    UnknownSignal(String),
}
