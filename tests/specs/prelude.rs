// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Shared helpers for black-box CLI specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolve the built `corral` binary, robust to the llvm-cov target layout.
pub fn binary_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug/corral");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/corral");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("corral");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn corral() -> assert_cmd::Command {
    assert_cmd::Command::from_std(std::process::Command::new(binary_path()))
}

/// Write `contents` to `<dir>/corral.json` and return its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("corral.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}
