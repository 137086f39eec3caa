// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Line-oriented forwarding of a child's stdout/stderr (§4.C).
//!
//! Each stream is read line by line on its own task. Every complete line is
//! prefixed and written to the caller's [`OutputSink`], then handed to a
//! caller-supplied callback so it can also be tested against
//! `started`/`error` patterns. The task exits cleanly on EOF; a read error
//! is reported once through `on_error` and then the task exits — a broken
//! pipe is just the process going away, not something the driver retries.

use crate::sink::OutputSink;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Spawn a task that reads `reader` line by line. Each line is written to
/// `sink` with `prefix` prepended, then passed to `on_line` (without its
/// trailing newline, without the prefix). `on_error` fires at most once,
/// the moment the stream read fails.
pub fn spawn_line_reader<R>(
    label: &'static str,
    reader: R,
    prefix: Arc<str>,
    sink: Arc<dyn OutputSink>,
    mut on_line: impl FnMut(&str) + Send + 'static,
    mut on_error: impl FnMut(std::io::Error) + Send + 'static,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    sink.write_line(&format!("{prefix}{line}"));
                    on_line(&line);
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(%label, error = %err, "line reader stopped");
                    on_error(err);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "pipe_tests.rs"]
mod tests;
