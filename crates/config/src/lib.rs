// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

//! Configuration loading and dependency-graph validation (§4.A,
//! §4.B, §6).

pub mod error;
pub mod graph;
pub mod load;
pub mod wire;

pub use error::ConfigError;
pub use graph::GraphError;
pub use load::{load_file, load_file_with_overrides, load_str, load_str_with_overrides, Format, Overrides};
