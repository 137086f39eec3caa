// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use crate::prelude::{corral, write_config};
use predicates::prelude::*;

#[test]
fn status_lists_every_declared_service_as_loaded_before_anything_starts() {
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
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("svc"))
        .stdout(predicate::str::contains("LOADED"));
}

#[test]
fn status_text_table_matches_the_expected_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "true" }],
          "groups": [{ "name": "g", "services": ["svc"] }]
        }"#,
    );

    let output = corral().arg("--config").arg(&config).arg("status").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    similar_asserts::assert_eq!(stdout, "NAME  STATUS     PID\nsvc   LOADED     -\n");
}

#[test]
fn status_reports_an_unknown_target_as_a_failure() {
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
        .arg("status")
        .arg("ghost")
        .assert()
        .failure();
}

#[test]
fn status_json_output_parses_as_an_array_of_service_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "true" }],
          "groups": [{ "name": "g", "services": ["svc"] }]
        }"#,
    );

    let output = corral()
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg("json")
        .arg("status")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "svc");
    assert_eq!(rows[0]["status"], "LOADED");
}
