// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Service runtime: the per-service driver task that owns a process's
//! lifecycle (§4.D).
//!
//! Status changes flow through a single [`watch`] channel rather than a
//! callback-per-status map — any observer (the orchestrator's barrier, the
//! control surface's `status` query, a test) subscribes to the same stream.
//! A full transition history is additionally kept for diagnostics and for
//! asserting the exact sequence a run produced.

use corral_core::{ServiceDescriptor, ServiceStatus, SignalKind, StopSpec};
use corral_proc::pipe::spawn_line_reader;
use corral_proc::{process, OutputSink, StdoutSink};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::time::Duration;

/// Maximum number of transitions retained in a service's history. Past this,
/// the oldest entry is dropped — the non-blocking "offer" semantics of §4.D.
const HISTORY_CAPACITY: usize = 64;

/// Hard wait after a stop signal (or stop command) before the remaining
/// process tree is force-destroyed (§5 "Timeouts").
const STOP_GRACE_PERIOD: Duration = Duration::from_secs(3);

struct Inner {
    status: ServiceStatus,
    pid: Option<u32>,
    match_count: u32,
    history: Vec<ServiceStatus>,
    stop_tx: Option<oneshot::Sender<()>>,
    io_error: Option<String>,
}

/// Drives one service through LOADED → STARTING → (STARTED↔ERROR)* →
/// STOPPING → STOPPED.
pub struct ServiceRuntime {
    pub descriptor: Arc<ServiceDescriptor>,
    status_tx: watch::Sender<ServiceStatus>,
    inner: Mutex<Inner>,
    sink: Arc<dyn OutputSink>,
}

impl ServiceRuntime {
    pub fn new(descriptor: Arc<ServiceDescriptor>) -> Arc<Self> {
        Self::new_with_sink(descriptor, Arc::new(StdoutSink))
    }

    /// Like [`ServiceRuntime::new`], but writing prefixed output lines to
    /// `sink` instead of the process's own stdout — the seam tests use to
    /// assert on captured output without touching a real file descriptor.
    pub fn new_with_sink(descriptor: Arc<ServiceDescriptor>, sink: Arc<dyn OutputSink>) -> Arc<Self> {
        let (status_tx, _rx) = watch::channel(ServiceStatus::Loaded);
        Arc::new(Self {
            descriptor,
            status_tx,
            inner: Mutex::new(Inner {
                status: ServiceStatus::Loaded,
                pid: None,
                match_count: 0,
                history: vec![ServiceStatus::Loaded],
                stop_tx: None,
                io_error: None,
            }),
            sink,
        })
    }

    /// The most recent stdout/stderr read error reported by this service's
    /// pattern pipes, if any (§4.C "reports I/O errors via a single error
    /// callback").
    pub fn io_error(&self) -> Option<String> {
        self.inner.lock().io_error.clone()
    }

    fn record_io_error(&self, stream: &'static str, err: std::io::Error) {
        tracing::warn!(service = %self.descriptor.name, %stream, error = %err, "output stream read failed");
        self.inner.lock().io_error = Some(format!("{stream}: {err}"));
    }

    /// The prefix a pattern pipe prepends to every line from this service,
    /// colored per its descriptor (§4.C).
    fn line_prefix(&self) -> Arc<str> {
        let index = self.descriptor.color.ansi216_index();
        Arc::from(format!("\x1b[38;5;{index}m[{}]\x1b[0m ", self.descriptor.name))
    }

    pub fn status(&self) -> ServiceStatus {
        *self.status_tx.borrow()
    }

    pub fn pid(&self) -> Option<u32> {
        self.inner.lock().pid
    }

    pub fn match_count(&self) -> u32 {
        self.inner.lock().match_count
    }

    pub fn history(&self) -> Vec<ServiceStatus> {
        self.inner.lock().history.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServiceStatus> {
        self.status_tx.subscribe()
    }

    /// Force a status for tests that need a "running" service without
    /// actually spawning a process.
    #[cfg(test)]
    pub(crate) fn set_status_for_test(&self, status: ServiceStatus) {
        self.inner.lock().status = status;
        let _ = self.status_tx.send(status);
    }

    fn transition(&self, next: ServiceStatus) {
        let mut inner = self.inner.lock();
        if !inner.status.can_transition_to(next) {
            tracing::debug!(
                service = %self.descriptor.name,
                from = %inner.status,
                to = %next,
                "ignoring illegal transition"
            );
            return;
        }
        inner.status = next;
        inner.history.push(next);
        if inner.history.len() > HISTORY_CAPACITY {
            inner.history.remove(0);
        }
        drop(inner);
        let _ = self.status_tx.send(next);
    }

    /// Synchronously claim the right to start this service: if it is in a
    /// startable status, transitions it to STARTING and returns `true`.
    /// Callers that need to subscribe to the status bus *before* the process
    /// is actually spawned (the orchestrator's barrier wait) must call this
    /// before spawning [`ServiceRuntime::run`] as a task, so that "not yet
    /// started" and "reverted to LOADED after a failed run" are never
    /// confused with the fresh, never-run LOADED a new instance starts in.
    pub fn begin(&self) -> bool {
        let mut inner = self.inner.lock();
        if !inner.status.can_start() {
            return false;
        }
        inner.status = ServiceStatus::Starting;
        inner.history.push(ServiceStatus::Starting);
        inner.match_count = 0;
        drop(inner);
        let _ = self.status_tx.send(ServiceStatus::Starting);
        true
    }

    /// Begin, then drive the service through a full run. Convenience for
    /// callers that do not need to observe STARTING before the process is
    /// spawned; the orchestrator instead calls [`ServiceRuntime::begin`]
    /// and [`ServiceRuntime::run_started`] separately.
    pub async fn run(self: &Arc<Self>) {
        if self.begin() {
            self.run_started().await;
        }
    }

    /// Drive an already-STARTING service through to STOPPED. Must be called
    /// only after [`ServiceRuntime::begin`] returned `true`.
    pub async fn run_started(self: &Arc<Self>) {
        let mut child = match process::spawn(&self.descriptor) {
            Ok(child) => child,
            Err(err) => {
                tracing::error!(service = %self.descriptor.name, error = %err, "spawn failed");
                // Per §4.D: a spawn failure is final for this run and the
                // service reverts to LOADED rather than advancing further.
                let mut inner = self.inner.lock();
                inner.status = ServiceStatus::Loaded;
                drop(inner);
                let _ = self.status_tx.send(ServiceStatus::Loaded);
                return;
            }
        };

        let pid = child.id();
        self.inner.lock().pid = pid;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let prefix = self.line_prefix();

        let started_self = self.clone();
        let started_patterns = self.descriptor.started_patterns.clone();
        let stdout_task = stdout.map(|stdout| {
            let sink = self.sink.clone();
            let prefix = prefix.clone();
            let io_error_self = started_self.clone();
            spawn_line_reader(
                "stdout",
                stdout,
                prefix,
                sink,
                move |line| started_self.observe_line(&started_patterns, line, ServiceStatus::Started),
                move |err| io_error_self.record_io_error("stdout", err),
            )
        });

        let error_self = self.clone();
        let error_patterns = self.descriptor.error_patterns.clone();
        let stderr_task = stderr.map(|stderr| {
            let sink = self.sink.clone();
            let prefix = prefix.clone();
            let io_error_self = error_self.clone();
            spawn_line_reader(
                "stderr",
                stderr,
                prefix,
                sink,
                move |line| error_self.observe_line(&error_patterns, line, ServiceStatus::Error),
                move |err| io_error_self.record_io_error("stderr", err),
            )
        });

        let (stop_tx, stop_rx) = oneshot::channel();
        self.inner.lock().stop_tx = Some(stop_tx);

        tokio::select! {
            _ = child.wait() => {}
            _ = stop_rx => {
                // `stop()` already sent the signal or ran the stop command;
                // give the process a grace period to exit on its own before
                // forcing it.
                if tokio::time::timeout(STOP_GRACE_PERIOD, child.wait()).await.is_err() {
                    let _ = child.kill().await;
                    let _ = child.wait().await;
                }
            }
        }

        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        self.inner.lock().stop_tx = None;
        self.transition(ServiceStatus::Stopping);
        if let Some(pid) = pid {
            self.destroy(pid).await;
        }
        self.inner.lock().pid = None;
        self.transition(ServiceStatus::Stopped);
    }

    fn observe_line(
        &self,
        patterns: &[corral_core::Pattern],
        line: &str,
        on_match: ServiceStatus,
    ) {
        if !patterns.iter().any(|p| p.is_match(line)) {
            return;
        }
        let mut inner = self.inner.lock();
        inner.match_count += 1;
        let already_settled = inner.status == on_match;
        drop(inner);
        if !already_settled {
            self.transition(on_match);
        }
    }

    /// Ask a running service to stop: signal-or-command per its `stopSpec`,
    /// racing against the driver's own exit, then force-destroy any
    /// remaining process tree so nothing is orphaned (§4.D "Stop procedure").
    pub async fn stop(self: &Arc<Self>) {
        let stop_tx = self.inner.lock().stop_tx.take();
        let Some(stop_tx) = stop_tx else {
            return;
        };

        match &self.descriptor.stop_spec {
            StopSpec::Signal(signal) => {
                if let Some(pid) = self.pid() {
                    for descendant in process::descendants(pid).await {
                        let _ = process::send_signal(descendant, *signal).await;
                    }
                    let _ = process::send_signal(pid, *signal).await;
                }
            }
            StopSpec::Command(command) => {
                let command = command.clone();
                let work_dir = self.descriptor.work_dir.clone();
                let stdin_file = self.descriptor.stop_stdin_file.clone();
                let timeout = Duration::from_secs(self.descriptor.stop_timeout_secs);
                let outcome = tokio::time::timeout(
                    timeout,
                    process::run_stop_command(&command, work_dir.as_deref(), stdin_file.as_deref()),
                )
                .await;
                if let Ok(Err(err)) = outcome {
                    tracing::warn!(service = %self.descriptor.name, error = %err, "stop command failed");
                } else if outcome.is_err() {
                    tracing::warn!(service = %self.descriptor.name, "stop command timed out");
                }
            }
        }

        let _ = stop_tx.send(());
    }

    async fn destroy(&self, pid: u32) {
        #[cfg(unix)]
        {
            if let Err(err) = process::kill_tree(pid).await {
                tracing::debug!(service = %self.descriptor.name, %pid, error = %err, "destroy failed (process likely already gone)");
            }
        }
        #[cfg(not(unix))]
        {
            let _ = pid;
        }
    }
}

/// `SIGKILL`'s process-tree-wide equivalent used by force-destroy, exposed
/// for the one caller (orchestrator shutdown) that needs to name it
/// explicitly rather than going through a service's own `stopSpec`.
pub const FORCE_DESTROY_SIGNAL: SignalKind = SignalKind::Sigkill;

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
