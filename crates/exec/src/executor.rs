// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns the range CLI as an argument vector and captures its output.
//!
//! The child never sees a shell. On Unix it leads its own process group so a
//! timeout, a cancellation, or dropping the in-flight future takes down every
//! descendant with it.

use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use rangewire_core::outcome::SYNTHETIC_EXIT_CODE;
use rangewire_core::{Command, ErrorKind, ExecutionOutcome, Interruption, WrapperConfig};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;

/// How long output pipes may stay open after the process is gone.
pub const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Errors that prevent an outcome from being produced at all.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn { program: String, source: std::io::Error },

    #[error("failed waiting for `{program}`: {source}")]
    Wait { program: String, source: std::io::Error },
}

impl ExecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecError::Spawn { source, .. } => ErrorKind::from_io(source),
            ExecError::Wait { .. } => ErrorKind::ExecutionFailure,
        }
    }
}

/// Runs a [`Command`] to completion, timeout, or cancellation.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Program every command is passed to.
    fn program(&self) -> &str;

    /// Run `command`, killing it once `timeout` elapses or `cancel` fires.
    ///
    /// Interruptions are reported as a synthetic outcome, not an error.
    async fn run(
        &self,
        command: &Command,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<ExecutionOutcome, ExecError>;
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Clone)]
pub struct ProcessExecutor {
    program: String,
    env: Vec<(&'static str, String)>,
}

impl fmt::Debug for ProcessExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.env.iter().map(|(k, _)| *k).collect();
        f.debug_struct("ProcessExecutor")
            .field("program", &self.program)
            .field("env", &keys)
            .finish()
    }
}

impl ProcessExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), env: Vec::new() }
    }

    pub fn from_config(config: &WrapperConfig) -> Self {
        Self::new(config.binary.clone()).with_env(config.child_env())
    }

    /// Variables set on every child in addition to the inherited environment.
    pub fn with_env(mut self, env: Vec<(&'static str, String)>) -> Self {
        self.env = env;
        self
    }
}

enum Waited {
    Exited(std::io::Result<ExitStatus>),
    Interrupted(Interruption),
}

#[async_trait]
impl ProcessRunner for ProcessExecutor {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(
        &self,
        command: &Command,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<ExecutionOutcome, ExecError> {
        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + timeout;

        let mut process = tokio::process::Command::new(&self.program);
        process
            .args(command.argv())
            .envs(self.env.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        process.process_group(0);

        let mut child = process
            .spawn()
            .map_err(|source| ExecError::Spawn { program: self.program.clone(), source })?;
        let mut group = GroupGuard { pgid: child.id() };
        let mut drain = Drain::start(&mut child);

        tracing::debug!(pid = ?child.id(), timeout_ms = timeout.as_millis(), "spawned range cli");

        let waited = tokio::select! {
            status = child.wait() => Waited::Exited(status),
            () = tokio::time::sleep_until(deadline) => Waited::Interrupted(Interruption::Timeout),
            () = cancel.cancelled() => Waited::Interrupted(Interruption::Cancelled),
        };

        match waited {
            Waited::Exited(status) => {
                let status = status
                    .map_err(|source| ExecError::Wait { program: self.program.clone(), source })?;
                // Descendants may still hold the pipes; they get until the deadline.
                let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
                if drain.finish(remaining.max(DRAIN_GRACE)).await {
                    group.disarm();
                } else {
                    tracing::warn!("output pipes still open after exit, killing process group");
                    group.kill();
                }
                let (stdout, stderr) = drain.output();
                Ok(ExecutionOutcome::exited(exit_code(status), stdout, stderr, started.elapsed()))
            }
            Waited::Interrupted(interruption) => {
                tracing::warn!(
                    ?interruption,
                    elapsed_ms = started.elapsed().as_millis(),
                    "terminating range cli"
                );
                group.kill();
                terminate(&mut child).await;
                drain.finish(DRAIN_GRACE).await;
                let (stdout, stderr) = drain.output();
                Ok(ExecutionOutcome::interrupted(interruption, stdout, stderr, started.elapsed()))
            }
        }
    }
}

/// Kill the direct child (covers platforms without process groups) and reap it.
async fn terminate(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "start_kill failed; child likely already exited");
    }
    if let Err(e) = child.wait().await {
        tracing::warn!(error = %e, "failed to reap terminated child");
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    SYNTHETIC_EXIT_CODE
}

/// Kills the child's process group when armed, including on drop.
struct GroupGuard {
    pgid: Option<u32>,
}

impl GroupGuard {
    fn kill(&mut self) {
        if let Some(pgid) = self.pgid.take() {
            kill_group(pgid);
        }
    }

    fn disarm(&mut self) {
        self.pgid = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn kill_group(pgid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pgid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(errno) => tracing::warn!(pgid, error = %errno, "failed to kill process group"),
    }
}

#[cfg(not(unix))]
fn kill_group(_pgid: u32) {}

/// Shared buffer a drain task appends to, readable even if the task is aborted.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

/// Concurrent readers for stdout and stderr.
struct Drain {
    stdout: Capture,
    stderr: Capture,
    tasks: [JoinHandle<()>; 2],
}

impl Drain {
    fn start(child: &mut Child) -> Self {
        let (stdout, out_task) = spawn_reader(child.stdout.take());
        let (stderr, err_task) = spawn_reader(child.stderr.take());
        Self { stdout, stderr, tasks: [out_task, err_task] }
    }

    /// Wait for both pipes to reach EOF. Returns `false` (and stops reading)
    /// if they are still open after `within`.
    async fn finish(&mut self, within: Duration) -> bool {
        let [out_task, err_task] = &mut self.tasks;
        let joined = tokio::time::timeout(within, async {
            let _ = tokio::join!(out_task, err_task);
        })
        .await
        .is_ok();
        if !joined {
            for task in &self.tasks {
                task.abort();
            }
        }
        joined
    }

    fn output(&self) -> (String, String) {
        (self.stdout.text(), self.stderr.text())
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> (Capture, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let capture = Capture::default();
    let sink = capture.clone();
    let task = tokio::spawn(async move {
        let Some(mut pipe) = pipe else {
            return;
        };
        let mut buf = [0u8; 8192];
        loop {
            match pipe.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => sink.0.lock().extend_from_slice(&buf[..n]),
                Err(e) => {
                    tracing::debug!(error = %e, "output pipe read failed");
                    break;
                }
            }
        }
    });
    (capture, task)
}
