// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single invocation of the range CLI, expressed as opaque argv tokens.
//!
//! Nothing in this module ever produces a string that is handed to a shell.
//! [`Command::argv`] is what gets executed; [`Command::display_line`] is a
//! quoted rendering meant for log lines only.

use serde::{Deserialize, Serialize};

/// Flag used to act on behalf of another user.
pub const USER_FLAG: &str = "--user";

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

/// A range CLI invocation: subcommand name, ordered arguments, and an
/// optional impersonated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    name: String,
    arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    acting_user: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), arguments: Vec::new(), acting_user: None }
    }

    /// Append one argument token.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Append several argument tokens, preserving order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Act on behalf of `user`. Rendered as a separate `--user <value>` pair.
    pub fn acting_as(mut self, user: Option<impl Into<String>>) -> Self {
        self.acting_user = user.map(Into::into);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn acting_user(&self) -> Option<&str> {
        self.acting_user.as_deref()
    }

    /// The argument vector passed to the process, excluding the program.
    ///
    /// Layout: `name, arguments..., [--user, <user>]`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.arguments.len() + 3);
        argv.push(self.name.clone());
        argv.extend(self.arguments.iter().cloned());
        if let Some(user) = &self.acting_user {
            argv.push(USER_FLAG.to_string());
            argv.push(user.clone());
        }
        argv
    }

    /// Human-readable command line for diagnostics.
    ///
    /// Tokens are single-quoted when they contain anything beyond a
    /// conservative safe set. The result is never executed.
    pub fn display_line(&self, program: &str) -> String {
        std::iter::once(program.to_string())
            .chain(self.argv())
            .map(|token| quote_for_display(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_for_display(token: &str) -> String {
    let is_safe = !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ',' | ':' | '=' | '@')
        });
    if is_safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
