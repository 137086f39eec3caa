// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use super::*;
use yare::parameterized;

#[parameterized(
    started = { ServiceStatus::Started, true },
    error = { ServiceStatus::Error, true },
    loaded = { ServiceStatus::Loaded, false },
    starting = { ServiceStatus::Starting, false },
    stopping = { ServiceStatus::Stopping, false },
    stopped = { ServiceStatus::Stopped, false },
)]
fn is_running_matches_spec(status: ServiceStatus, expected: bool) {
    assert_eq!(status.is_running(), expected);
}

#[parameterized(
    loaded = { ServiceStatus::Loaded, true },
    stopped = { ServiceStatus::Stopped, true },
    starting = { ServiceStatus::Starting, false },
    started = { ServiceStatus::Started, false },
    error = { ServiceStatus::Error, false },
    stopping = { ServiceStatus::Stopping, false },
)]
fn can_start_matches_spec(status: ServiceStatus, expected: bool) {
    assert_eq!(status.can_start(), expected);
}

#[test]
fn error_is_not_terminal_and_can_return_to_started() {
    assert!(ServiceStatus::Error.can_transition_to(ServiceStatus::Started));
    assert!(ServiceStatus::Error.can_transition_to(ServiceStatus::Stopping));
}

#[test]
fn stopped_can_restart() {
    assert!(ServiceStatus::Stopped.can_transition_to(ServiceStatus::Starting));
}

#[test]
fn loaded_cannot_jump_to_started() {
    assert!(!ServiceStatus::Loaded.can_transition_to(ServiceStatus::Started));
}

#[test]
fn display_is_lowercase() {
    assert_eq!(ServiceStatus::Starting.to_string(), "starting");
}
