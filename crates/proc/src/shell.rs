// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Platform shell wrapping for start/stop commands (§4.D "Start procedure").
//!
//! Every command string is handed to the platform shell unconditionally —
//! `sh -c` on Unix, `cmd /c` on Windows — rather than parsed or split
//! ourselves. This keeps the supervisor's own surface free of shell-syntax
//! edge cases and matches what every process supervisor in this space
//! actually does.

use tokio::process::Command;

/// Build a [`Command`] that runs `command` through the platform shell.
pub fn wrap(command: &str) -> Command {
    #[cfg(unix)]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/c").arg(command);
        cmd
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
