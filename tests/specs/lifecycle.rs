// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use crate::prelude::{binary_path, corral, write_config};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

#[test]
fn stop_of_an_unknown_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "true" }],
          "groups": [{ "name": "g", "services": ["svc"] }]
        }"#,
    );

    corral()
        .arg("--config")
        .arg(&config)
        .arg("stop")
        .arg("ghost")
        .assert()
        .failure();
}

/// S1-at-the-CLI-boundary: `start` blocks holding the foreground, and
/// responds to SIGINT by shutting everything down before it exits (§6's
/// "Exit: causes shutdownAll() then terminates").
#[test]
fn start_holds_the_foreground_and_shuts_down_on_sigint() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "echo ready; sleep 30", "startedPatterns": ["ready"] }],
          "groups": [{ "name": "g", "services": ["svc"] }]
        }"#,
    );

    let mut child = Command::new(binary_path())
        .arg("--config")
        .arg(&config)
        .arg("start")
        .arg("g")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();

    let mut saw_started = false;
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        match lines.next() {
            Some(Ok(line)) if line.contains("started") => {
                saw_started = true;
                break;
            }
            Some(Ok(_)) => continue,
            _ => break,
        }
    }
    assert!(saw_started, "expected a 'started g' line before the foreground hold");

    let pid = child.id().to_string();
    let status = Command::new("kill").arg("-INT").arg(&pid).status().unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shut down"));
}
