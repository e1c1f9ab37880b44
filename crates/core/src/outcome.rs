// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw result of one subprocess run, before normalization.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

/// Exit code recorded for processes that were killed by the executor.
pub const SYNTHETIC_EXIT_CODE: i32 = -1;

/// Why the executor terminated a process before it exited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interruption {
    Timeout,
    Cancelled,
}

/// Captured exit status and output streams of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interruption: Option<Interruption>,
}

impl ExecutionOutcome {
    /// Outcome of a process that exited by itself.
    pub fn exited(
        exit_code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration_ms: duration_ms(duration),
            interruption: None,
        }
    }

    /// Synthetic outcome for a process the executor had to kill.
    pub fn interrupted(
        interruption: Interruption,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code: SYNTHETIC_EXIT_CODE,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration_ms: duration_ms(duration),
            interruption: Some(interruption),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && self.interruption.is_none()
    }

    /// stdout followed by stderr, joined by a newline when both are present.
    ///
    /// Neither stream is trimmed or otherwise altered.
    pub fn combined_output(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) if self.stdout.ends_with('\n') => {
                format!("{}{}", self.stdout, self.stderr)
            }
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
