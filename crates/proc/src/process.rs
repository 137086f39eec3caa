// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Process spawning, signaling, and descendant teardown (§4.D "Start
//! procedure" and "Stop procedure", §5 containment).
//!
//! Signal delivery and descendant enumeration shell out to `kill`/`pgrep`
//! rather than reaching for a signals crate — the supervisor already treats
//! "ask the platform shell to do it" as the normal way to talk to processes
//! (see [`crate::shell`]), and no raw-syscall dependency is carried for it.

use crate::error::ProcError;
use corral_core::{ServiceDescriptor, SignalKind};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};

fn signal_name(signal: SignalKind) -> &'static str {
    match signal {
        SignalKind::Sigint => "INT",
        SignalKind::Sigterm => "TERM",
        SignalKind::Sighup => "HUP",
        SignalKind::Sigkill => "KILL",
        SignalKind::Sigquit => "QUIT",
    }
}

fn stdin_stdio(path: Option<&Path>) -> Result<Stdio, ProcError> {
    match path {
        None => Ok(Stdio::null()),
        Some(path) => {
            let file = std::fs::File::open(path).map_err(|source| ProcError::StdinFile {
                path: path.display().to_string(),
                source,
            })?;
            Ok(Stdio::from(file))
        }
    }
}

/// Spawn a service's start command through the platform shell, with stdout
/// and stderr piped for [`crate::pipe::spawn_line_reader`] to consume.
pub fn spawn(descriptor: &ServiceDescriptor) -> Result<Child, ProcError> {
    let mut cmd = crate::shell::wrap(&descriptor.start_command);
    if let Some(dir) = &descriptor.work_dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(stdin_stdio(descriptor.stdin_file.as_deref())?)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    cmd.spawn().map_err(|source| ProcError::SpawnFailed {
        command: descriptor.start_command.clone(),
        source,
    })
}

/// Send a named signal to a single pid via the platform `kill` utility.
#[cfg(unix)]
pub async fn send_signal(pid: u32, signal: SignalKind) -> Result<(), ProcError> {
    let status = Command::new("kill")
        .arg("-s")
        .arg(signal_name(signal))
        .arg(pid.to_string())
        .status()
        .await
        .map_err(|source| ProcError::SignalFailed { pid, source })?;

    if status.success() {
        Ok(())
    } else {
        Err(ProcError::SignalFailed {
            pid,
            source: std::io::Error::other(format!("kill exited with {status}")),
        })
    }
}

/// Run a stop command through the platform shell and wait for it to finish.
pub async fn run_stop_command(
    command: &str,
    work_dir: Option<&Path>,
    stdin_file: Option<&Path>,
) -> Result<(), ProcError> {
    let mut cmd = crate::shell::wrap(command);
    if let Some(dir) = work_dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(stdin_stdio(stdin_file)?);

    cmd.status()
        .await
        .map_err(|source| ProcError::StopCommandFailed {
            command: command.to_string(),
            source,
        })?;
    Ok(())
}

/// List the immediate child pids of `pid` via `pgrep -P`.
#[cfg(unix)]
async fn child_pids(pid: u32) -> Vec<u32> {
    let output = Command::new("pgrep")
        .arg("-P")
        .arg(pid.to_string())
        .output()
        .await;

    match output {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.trim().parse().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Post-order descendant enumeration: children of children first, so that a
/// SIGKILL sweep can safely kill leaves before their parents.
#[cfg(unix)]
pub async fn descendants(pid: u32) -> Vec<u32> {
    let mut acc = Vec::new();
    let mut stack = vec![pid];
    let mut frontier = Vec::new();
    while let Some(current) = stack.pop() {
        let children = child_pids(current).await;
        for child in &children {
            frontier.push(*child);
        }
        stack.extend(children);
    }
    frontier.reverse();
    acc.append(&mut frontier);
    acc
}

/// Force-destroy a process and any descendants it has spawned.
#[cfg(unix)]
pub async fn kill_tree(pid: u32) -> Result<(), ProcError> {
    for descendant in descendants(pid).await {
        let _ = send_signal(descendant, SignalKind::Sigkill).await;
    }
    send_signal(pid, SignalKind::Sigkill).await
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
