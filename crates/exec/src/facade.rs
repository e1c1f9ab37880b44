// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named range operations built on the generic execute primitive.
//!
//! Every call goes builder → runner → normalizer and always ends in a
//! [`ToolResult`]; nothing is returned as `Err` and nothing is retried.

use std::time::Duration;

use rangewire_core::{Command, ErrorKind, ExecutionOutcome, ToolResult, WrapperConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::builder::{ArgumentBuilder, Operation, TimeoutClass};
use crate::executor::{ProcessExecutor, ProcessRunner};
use crate::normalize::normalize;

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;

/// Options accepted by [`RangeCli::deploy_range`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
    /// Comma-separated ansible tags, passed through as one token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub only_roles: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub verbose_ansible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Wrapper around the range CLI.
///
/// Built once from a [`WrapperConfig`] and shared by reference; it holds no
/// mutable state, so calls may run concurrently. Every call takes the
/// caller's own [`CancellationToken`], which only ever kills that call's child.
pub struct RangeCli<R: ProcessRunner = ProcessExecutor> {
    config: WrapperConfig,
    builder: ArgumentBuilder,
    runner: R,
}

impl RangeCli<ProcessExecutor> {
    pub fn from_config(config: WrapperConfig) -> Self {
        let runner = ProcessExecutor::from_config(&config);
        Self::with_runner(config, runner)
    }
}

impl<R: ProcessRunner> RangeCli<R> {
    pub fn with_runner(config: WrapperConfig, runner: R) -> Self {
        let builder = ArgumentBuilder::new(config.json_output);
        Self { config, builder, runner }
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `name` (split on whitespace) with literal `args`.
    pub async fn execute_arbitrary_command(
        &self,
        name: &str,
        args: &[String],
        user: Option<&str>,
        cancel: &CancellationToken,
    ) -> ToolResult {
        let params = json!({ "command": name, "args": args, "user": user });
        self.run_operation(Operation::Execute, &params, cancel).await
    }

    pub async fn deploy_range(
        &self,
        options: &DeployOptions,
        cancel: &CancellationToken,
    ) -> ToolResult {
        let params = match serde_json::to_value(options) {
            Ok(params) => params,
            Err(e) => return ToolResult::failed(ErrorKind::InvalidArgument, e.to_string(), ""),
        };
        self.run_operation(Operation::Deploy, &params, cancel).await
    }

    pub async fn get_range_status(
        &self,
        user: Option<&str>,
        cancel: &CancellationToken,
    ) -> ToolResult {
        self.run_operation(Operation::RangeStatus, &json!({ "user": user }), cancel)
            .await
    }

    pub async fn list_user_ranges(
        &self,
        user: Option<&str>,
        cancel: &CancellationToken,
    ) -> ToolResult {
        self.run_operation(Operation::RangeList, &json!({ "user": user }), cancel)
            .await
    }

    pub async fn get_tags(&self, user: Option<&str>, cancel: &CancellationToken) -> ToolResult {
        self.run_operation(Operation::Tags, &json!({ "user": user }), cancel)
            .await
    }

    pub async fn list_all_users(&self, cancel: &CancellationToken) -> ToolResult {
        self.run_operation(Operation::UserList, &Value::Null, cancel)
            .await
    }

    /// Untyped entry point: validate `params`, run, normalize.
    pub async fn run_operation(
        &self,
        operation: Operation,
        params: &Value,
        cancel: &CancellationToken,
    ) -> ToolResult {
        let span = tracing::info_span!(
            "rangewire.call",
            call_id = %Uuid::new_v4(),
            operation = operation.as_str()
        );
        async {
            let command = match self.builder.build(operation, params) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!(error = %e, "rejected parameters");
                    return ToolResult::failed(e.kind(), e.to_string(), "");
                }
            };
            let timeout = self.timeout(operation.timeout_class());
            match self.spawn(&command, timeout, cancel).await {
                Ok(outcome) => finish(normalize(outcome)),
                Err(result) => result,
            }
        }
        .instrument(span)
        .await
    }

    /// Help text for `operation` under the quick timeout.
    ///
    /// `command` only matters for [`Operation::Execute`], where it names the
    /// CLI command to describe.
    pub async fn help(
        &self,
        operation: Operation,
        command: Option<&str>,
        cancel: &CancellationToken,
    ) -> ToolResult {
        let span = tracing::info_span!(
            "rangewire.call",
            call_id = %Uuid::new_v4(),
            operation = operation.as_str(),
            help = true
        );
        async {
            let command = self.builder.help(operation, command);
            let outcome = match self.spawn(&command, self.config.timeouts.quick(), cancel).await {
                Ok(outcome) => outcome,
                Err(result) => return result,
            };
            if !outcome.succeeded() {
                return finish(normalize(outcome));
            }
            // Some CLIs print usage to stderr even on success.
            let raw_output = outcome.combined_output();
            let text = if outcome.stdout.trim().is_empty() {
                outcome.stderr
            } else {
                outcome.stdout
            };
            finish(ToolResult::succeeded(None, text, raw_output))
        }
        .instrument(span)
        .await
    }

    async fn spawn(
        &self,
        command: &Command,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<ExecutionOutcome, ToolResult> {
        tracing::debug!(
            command = %command.display_line(self.runner.program()),
            timeout_ms = timeout.as_millis(),
            "invoking range cli"
        );
        match self.runner.run(command, timeout, cancel).await {
            Ok(outcome) => {
                tracing::debug!(
                    exit_code = outcome.exit_code,
                    duration_ms = outcome.duration_ms,
                    interruption = ?outcome.interruption,
                    "range cli finished"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "range cli could not be run");
                Err(ToolResult::failed(e.kind(), e.to_string(), ""))
            }
        }
    }

    fn timeout(&self, class: TimeoutClass) -> Duration {
        match class {
            TimeoutClass::Quick => self.config.timeouts.quick(),
            TimeoutClass::Standard => self.config.timeouts.standard(),
            TimeoutClass::Deploy => self.config.timeouts.deploy(),
        }
    }
}

fn finish(result: ToolResult) -> ToolResult {
    match result.error_kind() {
        None => tracing::info!("range cli succeeded"),
        Some(kind) => {
            tracing::info!(error_kind = %kind, message = %result.message, "range cli failed")
        }
    }
    result
}
