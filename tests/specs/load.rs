// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use crate::prelude::{corral, write_config};
use predicates::prelude::*;

#[test]
fn load_accepts_a_valid_config() {
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
        .arg("load")
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded"));
}

#[test]
fn load_rejects_a_missing_file() {
    corral()
        .arg("--config")
        .arg("/nonexistent/corral.json")
        .arg("load")
        .assert()
        .failure();
}

#[test]
fn load_rejects_a_cyclic_group_graph() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "true" }],
          "groups": [
            { "name": "a", "services": ["svc"], "dependencies": ["b"] },
            { "name": "b", "services": ["svc"], "dependencies": ["a"] }
          ]
        }"#,
    );

    corral().arg("--config").arg(&config).arg("load").assert().failure();
}

#[test]
fn config_flag_takes_precedence_over_corral_config_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{ "services": [{ "name": "svc", "start": "true" }], "groups": [{ "name": "g", "services": ["svc"] }] }"#,
    );

    corral()
        .env("CORRAL_CONFIG", "/nonexistent/corral.json")
        .arg("--config")
        .arg(&config)
        .arg("load")
        .assert()
        .success();
}

#[test]
fn config_falls_back_to_corral_json_in_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"{ "services": [{ "name": "svc", "start": "true" }], "groups": [{ "name": "g", "services": ["svc"] }] }"#,
    );

    corral()
        .current_dir(dir.path())
        .env_remove("CORRAL_CONFIG")
        .arg("load")
        .assert()
        .success();
}

#[test]
fn max_depth_env_override_rejects_a_graph_beyond_the_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
          "services": [{ "name": "svc", "start": "true" }],
          "groups": [
            { "name": "g1", "services": ["svc"] },
            { "name": "g2", "services": ["svc"], "dependencies": ["g1"] }
          ]
        }"#,
    );

    corral()
        .env("CORRAL_MAX_DEPTH", "1")
        .arg("--config")
        .arg(&config)
        .arg("load")
        .assert()
        .failure();
}
