// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Handlers return `ExitError` instead of exiting, so `main()` stays the
//! only place the process terminates and the log writer gets flushed.

use std::fmt;

/// The wrapped command ran and reported failure.
pub const EXIT_FAILED: i32 = 1;
/// The host could not do its job (bad config, unreadable input, output error).
pub const EXIT_HOST: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::new(EXIT_HOST, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit code for a top-level error: its own code when it is an [`ExitError`],
/// otherwise [`EXIT_HOST`].
pub fn code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map_or(EXIT_HOST, |e| e.code)
}
