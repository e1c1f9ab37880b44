// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps a failed [`ExecutionOutcome`] onto an [`ErrorKind`].
//!
//! Pattern matching is a best-effort heuristic over the CLI's error text.
//! Anything unrecognized degrades to [`ErrorKind::ExecutionFailure`].

use rangewire_core::{ErrorKind, ExecutionOutcome, Interruption};
use serde_json::Value;

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

const PERMISSION_PATTERNS: &[&str] = &[
    "permission denied",
    "unauthorized",
    "forbidden",
    "not authorized",
    "access denied",
    "must be an admin",
    "requires admin",
    "admin privileges",
    "status code 401",
    "status code 403",
    "status 401",
    "status 403",
];

const NOT_FOUND_PATTERNS: &[&str] = &[
    "not found",
    "no such",
    "does not exist",
    "doesn't exist",
    "status code 404",
    "status 404",
];

const USAGE_PATTERNS: &[&str] = &[
    "unknown flag",
    "unknown shorthand flag",
    "unknown command",
    "invalid argument",
    "required flag",
];

/// Exit status shells and exec wrappers use for "found but not executable".
const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Exit status shells and exec wrappers use for "command not found".
const EXIT_NOT_FOUND: i32 = 127;

/// Classify a failed outcome. Pure; never panics on unrecognized text.
///
/// Interrupted outcomes bypass the patterns: timeouts are
/// [`ErrorKind::Timeout`], cancellations [`ErrorKind::ExecutionFailure`].
pub fn classify(outcome: &ExecutionOutcome) -> ErrorKind {
    match outcome.interruption {
        Some(Interruption::Timeout) => return ErrorKind::Timeout,
        Some(Interruption::Cancelled) => return ErrorKind::ExecutionFailure,
        None => {}
    }

    let text = failure_text(outcome).to_lowercase();
    if contains_any(&text, PERMISSION_PATTERNS) {
        return ErrorKind::PermissionDenied;
    }
    if contains_any(&text, NOT_FOUND_PATTERNS) {
        return ErrorKind::NotFound;
    }
    if contains_any(&text, USAGE_PATTERNS) {
        return ErrorKind::InvalidArgument;
    }

    match outcome.exit_code {
        EXIT_NOT_EXECUTABLE => ErrorKind::PermissionDenied,
        EXIT_NOT_FOUND => ErrorKind::NotFound,
        _ => ErrorKind::ExecutionFailure,
    }
}

/// The text that best describes why the command failed.
///
/// Stderr wins whenever it has text: its JSON error body, else the text
/// itself. Only a silent stderr falls back to stdout, read the same way.
/// Trimmed.
pub fn failure_text(outcome: &ExecutionOutcome) -> String {
    stream_text(&outcome.stderr).or_else(|| stream_text(&outcome.stdout)).unwrap_or_default()
}

fn stream_text(stream: &str) -> Option<String> {
    let trimmed = stream.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(error_body(trimmed).unwrap_or_else(|| trimmed.to_string()))
}

/// Extract the message from a JSON error body such as `{"error": "..."}`.
///
/// Recognizes `error`, `message`, `detail` and `result` string fields, and
/// one level of nesting under `error`.
pub fn error_body(text: &str) -> Option<String> {
    let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text.trim()) else {
        return None;
    };
    for key in ["error", "message", "detail", "result"] {
        match body.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.trim().to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
