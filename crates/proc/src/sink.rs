// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Output sink: the shared destination a pattern pipe writes prefixed lines
//! to (§4.C, §5 "The output sink is a shared stream; pattern pipes write
//! whole lines under a sink-level lock so interleaving is at line
//! granularity").

use std::io::Write as _;

/// A destination for whole, already-prefixed output lines. Never closed by
/// a pattern pipe — a sink may be shared by every service's pipes.
pub trait OutputSink: Send + Sync + 'static {
    fn write_line(&self, line: &str);
}

/// Forwards lines to the supervisor's own stdout. Each call takes the
/// stdout lock for exactly one line, so two services' lines can interleave
/// but never split a line in half.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        let _ = writeln!(lock, "{line}");
    }
}
