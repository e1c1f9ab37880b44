// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`ProcessRunner`] for facade and host tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rangewire_core::{Command, ExecutionOutcome};
use tokio_util::sync::CancellationToken;

use crate::executor::{ExecError, ProcessRunner};

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub command: Command,
    pub timeout: Duration,
}

enum Scripted {
    Outcome(ExecutionOutcome),
    SpawnError(std::io::ErrorKind),
}

#[derive(Default)]
struct FakeRunnerState {
    calls: Vec<RunCall>,
    queue: VecDeque<Scripted>,
}

/// Fake runner: records every command and replays queued results.
///
/// With nothing queued, each run exits 0 with `{}` on stdout.
#[derive(Clone)]
pub struct FakeRunner {
    program: String,
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self { program: "ludus".to_string(), inner: Arc::default() }
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unscripted run.
    pub fn push_outcome(&self, outcome: ExecutionOutcome) -> &Self {
        self.inner.lock().queue.push_back(Scripted::Outcome(outcome));
        self
    }

    /// Queue an exit with the given code and streams.
    pub fn push_exit(&self, code: i32, stdout: &str, stderr: &str) -> &Self {
        self.push_outcome(ExecutionOutcome::exited(code, stdout, stderr, Duration::ZERO))
    }

    /// Queue a spawn failure carrying `kind`.
    pub fn push_spawn_error(&self, kind: std::io::ErrorKind) -> &Self {
        self.inner.lock().queue.push_back(Scripted::SpawnError(kind));
        self
    }

    /// All recorded invocations, oldest first.
    pub fn calls(&self) -> Vec<RunCall> {
        self.inner.lock().calls.clone()
    }

    /// Argv of every recorded invocation.
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.inner.lock().calls.iter().map(|c| c.command.argv()).collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(
        &self,
        command: &Command,
        timeout: Duration,
        _cancel: &CancellationToken,
    ) -> Result<ExecutionOutcome, ExecError> {
        let mut state = self.inner.lock();
        state.calls.push(RunCall { command: command.clone(), timeout });
        match state.queue.pop_front() {
            Some(Scripted::Outcome(outcome)) => Ok(outcome),
            Some(Scripted::SpawnError(kind)) => Err(ExecError::Spawn {
                program: self.program.clone(),
                source: std::io::Error::new(kind, "scripted spawn failure"),
            }),
            None => Ok(ExecutionOutcome::exited(0, "{}", "", Duration::ZERO)),
        }
    }
}
