// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure taxonomy attached to every unsuccessful [`crate::ToolResult`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;

/// Why a wrapped invocation failed.
///
/// Callers branch on this value; they never parse the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The process did not finish within its timeout and was killed.
    Timeout,
    /// The caller lacks the rights for the requested operation.
    PermissionDenied,
    /// The target resource (or the CLI binary itself) does not exist.
    NotFound,
    /// Rejected before spawning, or the CLI reported a usage error.
    InvalidArgument,
    /// A request body could not be decoded.
    ParseFailure,
    /// Any other failure.
    ExecutionFailure,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Timeout,
        ErrorKind::PermissionDenied,
        ErrorKind::NotFound,
        ErrorKind::InvalidArgument,
        ErrorKind::ParseFailure,
        ErrorKind::ExecutionFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::ExecutionFailure => "execution_failure",
        }
    }

    /// Map an I/O error raised while spawning the CLI.
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::ExecutionFailure,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
