// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! corral-core: shared descriptors, identifiers, and status vocabulary for
//! the `corral` process supervisor.

pub mod color;
pub mod config;
pub mod error;
pub mod group;
pub mod service;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use color::Color;
pub use config::Configuration;
pub use error::ModelError;
pub use group::{GroupDescriptor, GroupSpec};
pub use service::{Pattern, ServiceDescriptor, ServiceSpec, SignalKind, StopSpec};
pub use status::ServiceStatus;

/// Identifiers match this pattern across services and groups.
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9 _.-]+$";

/// Default number of seconds a service is given to shut down before force-destroy.
pub const DEFAULT_STOP_TIMEOUT_SECS: u64 = 5;

/// Default maximum dependency depth for a group graph.
pub const DEFAULT_MAX_DEPTH: u32 = 5;
