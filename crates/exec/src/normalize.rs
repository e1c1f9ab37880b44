// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns an [`ExecutionOutcome`] into the uniform [`ToolResult`].

use rangewire_core::{ExecutionOutcome, Interruption, ToolResult};
use serde_json::Value;

use crate::classify::{classify, failure_text};

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;

pub const SUCCESS_MESSAGE: &str = "command completed successfully";

/// Normalize a finished (or interrupted) invocation.
///
/// A zero exit is always a success: JSON objects and arrays on stdout become
/// `data`, anything else is passed through as the message. A non-zero exit
/// or an interruption is a failure classified by [`classify`]. `raw_output`
/// is the unmodified combined output in every case.
pub fn normalize(outcome: ExecutionOutcome) -> ToolResult {
    let raw_output = outcome.combined_output();

    if let Some(interruption) = outcome.interruption {
        let message = match interruption {
            Interruption::Timeout => {
                format!("command timed out after {} ms and was terminated", outcome.duration_ms)
            }
            Interruption::Cancelled => "command was cancelled and terminated".to_string(),
        };
        return ToolResult::failed(classify(&outcome), message, raw_output);
    }

    if outcome.exit_code == 0 {
        return match parse_structured(&outcome.stdout) {
            Some(data) => ToolResult::succeeded(Some(data), SUCCESS_MESSAGE, raw_output),
            None if outcome.stdout.trim().is_empty() => {
                ToolResult::succeeded(None, SUCCESS_MESSAGE, raw_output)
            }
            None => ToolResult::succeeded(None, outcome.stdout, raw_output),
        };
    }

    let mut message = failure_text(&outcome);
    if message.is_empty() {
        message = format!("command exited with code {}", outcome.exit_code);
    }
    ToolResult::failed(classify(&outcome), message, raw_output)
}

/// Parse stdout as a JSON object or array. Scalars count as free text.
fn parse_structured(stdout: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(stdout.trim()) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}
