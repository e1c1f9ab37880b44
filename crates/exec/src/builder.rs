// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a logical operation plus a JSON option bag into a [`Command`].
//!
//! Each [`Operation`] owns a closed table of [`OptionSpec`]s. Keys outside the
//! table are rejected, values are type-checked, and every value becomes its
//! own argv token. The only free text accepted is the generic `command`
//! string, which is split on whitespace and never evaluated.

use std::fmt;

use rangewire_core::{Command, ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;

/// Global flag asking the CLI for machine-readable output.
pub const JSON_FLAG: &str = "--json";
/// Flag substituted by help variants.
pub const HELP_FLAG: &str = "--help";

/// Parameter rejected before anything was spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("parameters for {operation} must be a JSON object")]
    NotAnObject { operation: Operation },

    #[error("unrecognized option `{key}` for {operation}")]
    UnknownOption { operation: Operation, key: String },

    #[error("option `{key}` expects {expected}")]
    WrongType { key: &'static str, expected: &'static str },

    #[error("option `{key}` must not be empty")]
    Empty { key: &'static str },

    #[error("missing required option `{key}` for {operation}")]
    Missing { operation: Operation, key: &'static str },
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// How a recognized option maps onto argv tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `true` emits the bare flag, `false` emits nothing.
    Flag,
    /// Non-empty string, emitted as `flag value`.
    Value,
    /// String or list of strings, emitted as `flag a,b,c`.
    List,
    /// Impersonated user, carried on the command rather than in the table.
    User,
    /// Whitespace-split command words placed before everything else.
    CommandLine,
    /// Explicit argv tokens appended verbatim after the command words.
    Arguments,
}

/// One entry of an operation's option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub token: &'static str,
    pub kind: OptionKind,
}

const fn spec(key: &'static str, token: &'static str, kind: OptionKind) -> OptionSpec {
    OptionSpec { key, token, kind }
}

const USER: OptionSpec = spec("user", "", OptionKind::User);

const EXECUTE_OPTIONS: &[OptionSpec] = &[
    spec("command", "", OptionKind::CommandLine),
    spec("args", "", OptionKind::Arguments),
    USER,
];

const DEPLOY_OPTIONS: &[OptionSpec] = &[
    spec("config_path", "--config", OptionKind::Value),
    spec("force", "--force", OptionKind::Flag),
    spec("tags", "--tags", OptionKind::List),
    spec("limit", "--limit", OptionKind::Value),
    spec("only_roles", "--only-roles", OptionKind::List),
    spec("verbose_ansible", "--verbose-ansible", OptionKind::Flag),
    USER,
];

const USER_ONLY: &[OptionSpec] = &[USER];

/// Logical operations the wrapper knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Execute,
    Deploy,
    RangeStatus,
    RangeList,
    Tags,
    UserList,
}

/// Timeout budget an operation runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    Quick,
    Standard,
    Deploy,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Execute,
        Operation::Deploy,
        Operation::RangeStatus,
        Operation::RangeList,
        Operation::Tags,
        Operation::UserList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Execute => "execute",
            Operation::Deploy => "deploy",
            Operation::RangeStatus => "range_status",
            Operation::RangeList => "range_list",
            Operation::Tags => "tags",
            Operation::UserList => "user_list",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Fixed CLI words that open the argv. Empty for the generic operation.
    pub fn base_tokens(&self) -> &'static [&'static str] {
        match self {
            Operation::Execute => &[],
            Operation::Deploy => &["range", "deploy"],
            Operation::RangeStatus => &["range", "status"],
            Operation::RangeList => &["range", "list"],
            Operation::Tags => &["range", "gettags"],
            Operation::UserList => &["users", "list", "--all"],
        }
    }

    pub fn options(&self) -> &'static [OptionSpec] {
        match self {
            Operation::Execute => EXECUTE_OPTIONS,
            Operation::Deploy => DEPLOY_OPTIONS,
            Operation::RangeStatus | Operation::RangeList | Operation::Tags => USER_ONLY,
            Operation::UserList => &[],
        }
    }

    /// Whether the CLI returns data worth requesting as JSON.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Operation::RangeStatus | Operation::RangeList | Operation::Tags | Operation::UserList
        )
    }

    pub fn timeout_class(&self) -> TimeoutClass {
        match self {
            Operation::Deploy => TimeoutClass::Deploy,
            _ => TimeoutClass::Standard,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds [`Command`]s from validated option bags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentBuilder {
    json_output: bool,
}

impl ArgumentBuilder {
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Validate `params` against the operation's table and build the command.
    ///
    /// `params` must be a JSON object or `null`. Tokens are emitted in table
    /// order, so the argv does not depend on key order in the input.
    pub fn build(&self, operation: Operation, params: &Value) -> Result<Command, BuildError> {
        let empty = Map::new();
        let params = match params {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(BuildError::NotAnObject { operation }),
        };

        let table = operation.options();
        if let Some(key) = params.keys().find(|k| !table.iter().any(|s| s.key == k.as_str())) {
            return Err(BuildError::UnknownOption { operation, key: key.clone() });
        }

        let mut words: Vec<String> =
            operation.base_tokens().iter().map(|t| t.to_string()).collect();
        let mut options = Vec::new();
        let mut user = None;

        for spec in table {
            let value = match params.get(spec.key) {
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };
            match spec.kind {
                OptionKind::Flag => {
                    if as_bool(spec, value)? {
                        options.push(spec.token.to_string());
                    }
                }
                OptionKind::Value => {
                    options.push(spec.token.to_string());
                    options.push(as_string(spec, value)?);
                }
                OptionKind::List => {
                    options.push(spec.token.to_string());
                    options.push(as_list(spec, value)?);
                }
                OptionKind::User => user = Some(as_string(spec, value)?),
                OptionKind::CommandLine => {
                    words.extend(as_string(spec, value)?.split_whitespace().map(str::to_string));
                }
                OptionKind::Arguments => options.extend(as_tokens(spec, value)?),
            }
        }

        if operation == Operation::Execute && words.is_empty() {
            return Err(BuildError::Missing { operation, key: "command" });
        }
        if self.json_output && operation.is_structured() {
            words.push(JSON_FLAG.to_string());
        }

        let mut words = words.into_iter();
        let name = words.next().unwrap_or_default();
        Ok(Command::new(name).args(words).args(options).acting_as(user))
    }

    /// Help variant: the operation's command words followed by `--help`.
    ///
    /// For the generic operation `command` selects which CLI command to
    /// describe; without it the top-level help is requested.
    pub fn help(&self, operation: Operation, command: Option<&str>) -> Command {
        let mut words: Vec<String> = match operation {
            Operation::Execute => {
                command.unwrap_or_default().split_whitespace().map(str::to_string).collect()
            }
            _ => operation
                .base_tokens()
                .iter()
                .filter(|t| !t.starts_with('-'))
                .map(|t| t.to_string())
                .collect(),
        };
        words.push(HELP_FLAG.to_string());
        let mut words = words.into_iter();
        let name = words.next().unwrap_or_default();
        Command::new(name).args(words)
    }
}

fn as_bool(spec: &OptionSpec, value: &Value) -> Result<bool, BuildError> {
    value.as_bool().ok_or(BuildError::WrongType { key: spec.key, expected: "a boolean" })
}

fn as_string(spec: &OptionSpec, value: &Value) -> Result<String, BuildError> {
    let s = value.as_str().ok_or(BuildError::WrongType { key: spec.key, expected: "a string" })?;
    if s.trim().is_empty() {
        return Err(BuildError::Empty { key: spec.key });
    }
    Ok(s.to_string())
}

fn as_list(spec: &OptionSpec, value: &Value) -> Result<String, BuildError> {
    match value {
        Value::String(_) => as_string(spec, value),
        Value::Array(_) => {
            let items = as_tokens(spec, value)?;
            if items.is_empty() || items.iter().any(|i| i.trim().is_empty()) {
                return Err(BuildError::Empty { key: spec.key });
            }
            Ok(items.join(","))
        }
        _ => Err(BuildError::WrongType { key: spec.key, expected: "a string or list of strings" }),
    }
}

fn as_tokens(spec: &OptionSpec, value: &Value) -> Result<Vec<String>, BuildError> {
    let wrong = BuildError::WrongType { key: spec.key, expected: "a list of strings" };
    let items = value.as_array().ok_or_else(|| wrong.clone())?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| wrong.clone()))
        .collect()
}
