// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniform value returned by every wrapped operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::ErrorKind;

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;

/// Uniform response shape handed back to tool handlers.
///
/// A failed result never carries `data` and always carries an `error_kind`.
/// `raw_output` holds the untouched combined process output in both cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    pub message: String,
    pub raw_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
}

impl ToolResult {
    pub fn succeeded(
        data: Option<Value>,
        message: impl Into<String>,
        raw_output: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            raw_output: raw_output.into(),
            error_kind: None,
        }
    }

    pub fn failed(
        kind: ErrorKind,
        message: impl Into<String>,
        raw_output: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            raw_output: raw_output.into(),
            error_kind: Some(kind),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// One-line summary for logs and text output.
    pub fn summary(&self) -> String {
        match self.error_kind {
            None => format!("ok: {}", first_line(&self.message)),
            Some(kind) => format!("{}: {}", kind, first_line(&self.message)),
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
