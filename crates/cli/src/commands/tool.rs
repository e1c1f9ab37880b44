// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON tool calls for agent hosts.
//!
//! A call is `{"tool": "<name>", "arguments": {...}}`. The arguments are the
//! operation's option bag; `"help": true` asks for the help variant instead.

use std::io::Read;

use anyhow::Result;
use clap::Args;
use rangewire_core::{ErrorKind, ToolResult};
use rangewire_exec::{Operation, ProcessRunner, RangeCli};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::exit_error::ExitError;

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;

/// Argument key selecting the help variant.
const HELP_KEY: &str = "help";

#[derive(Args)]
pub struct ToolArgs {
    /// Tool call JSON. If omitted, reads from stdin
    #[arg(value_name = "JSON")]
    pub call: Option<String>,

    /// Describe the available tools instead of calling one
    #[arg(long, conflicts_with = "call")]
    pub list: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Tools exposed to agent hosts, one per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ExecuteCommand,
    DeployRange,
    GetRangeStatus,
    ListUserRanges,
    GetTags,
    ListAllUsers,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::ExecuteCommand,
        Tool::DeployRange,
        Tool::GetRangeStatus,
        Tool::ListUserRanges,
        Tool::GetTags,
        Tool::ListAllUsers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::ExecuteCommand => "execute_command",
            Tool::DeployRange => "deploy_range",
            Tool::GetRangeStatus => "get_range_status",
            Tool::ListUserRanges => "list_user_ranges",
            Tool::GetTags => "get_tags",
            Tool::ListAllUsers => "list_all_users",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn operation(&self) -> Operation {
        match self {
            Tool::ExecuteCommand => Operation::Execute,
            Tool::DeployRange => Operation::Deploy,
            Tool::GetRangeStatus => Operation::RangeStatus,
            Tool::ListUserRanges => Operation::RangeList,
            Tool::GetTags => Operation::Tags,
            Tool::ListAllUsers => Operation::UserList,
        }
    }
}

pub async fn handle<R: ProcessRunner>(
    args: ToolArgs,
    cli: &RangeCli<R>,
    cancel: &CancellationToken,
) -> Result<ToolResult> {
    if args.list {
        return Ok(describe());
    }
    let body = match args.call {
        Some(body) => body,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ExitError::host(format!("failed to read tool call from stdin: {e}")))?;
            buf
        }
    };
    Ok(run(cli, &body, cancel).await)
}

/// Parse and dispatch one tool call body.
pub async fn run<R: ProcessRunner>(
    cli: &RangeCli<R>,
    body: &str,
    cancel: &CancellationToken,
) -> ToolResult {
    match parse(body) {
        Ok(call) => dispatch(cli, call, cancel).await,
        Err(result) => result,
    }
}

pub fn parse(body: &str) -> Result<ToolCall, ToolResult> {
    serde_json::from_str(body).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            let message = format!("tool call is not valid JSON: {e}");
            ToolResult::failed(ErrorKind::ParseFailure, message, "")
        } else {
            ToolResult::failed(ErrorKind::InvalidArgument, format!("malformed tool call: {e}"), "")
        }
    })
}

pub async fn dispatch<R: ProcessRunner>(
    cli: &RangeCli<R>,
    call: ToolCall,
    cancel: &CancellationToken,
) -> ToolResult {
    let Some(tool) = Tool::from_name(&call.tool) else {
        let known: Vec<&str> = Tool::ALL.iter().map(Tool::name).collect();
        return ToolResult::failed(
            ErrorKind::InvalidArgument,
            format!("unknown tool `{}` (expected one of: {})", call.tool, known.join(", ")),
            "",
        );
    };
    let mut arguments = call.arguments;
    let help = match take_help(&mut arguments) {
        Ok(help) => help,
        Err(result) => return result,
    };
    tracing::debug!(tool = tool.name(), help, "dispatching tool call");

    if help {
        let command = arguments.get("command").and_then(Value::as_str);
        return cli.help(tool.operation(), command, cancel).await;
    }
    cli.run_operation(tool.operation(), &arguments, cancel).await
}

fn take_help(arguments: &mut Value) -> Result<bool, ToolResult> {
    let Value::Object(map) = arguments else {
        return Ok(false);
    };
    match map.remove(HELP_KEY) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(help)) => Ok(help),
        Some(_) => Err(ToolResult::failed(
            ErrorKind::InvalidArgument,
            format!("option `{HELP_KEY}` expects a boolean"),
            "",
        )),
    }
}

/// Tool catalogue: each tool's operation and accepted argument keys.
pub fn describe() -> ToolResult {
    let tools: Vec<Value> = Tool::ALL
        .iter()
        .map(|tool| {
            let mut keys: Vec<&str> = tool.operation().options().iter().map(|o| o.key).collect();
            keys.push(HELP_KEY);
            json!({
                "name": tool.name(),
                "operation": tool.operation().as_str(),
                "arguments": keys,
            })
        })
        .collect();
    let message = format!("{} tools available", tools.len());
    ToolResult::succeeded(Some(Value::Array(tools)), message, "")
}
