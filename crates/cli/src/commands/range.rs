// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named range operations as subcommands

use clap::Args;
use rangewire_core::ToolResult;
use rangewire_exec::{DeployOptions, Operation, ProcessRunner, RangeCli};
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;

#[derive(Args)]
pub struct UserArgs {
    /// Act on behalf of this user (admin only)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Command words, e.g. "range logs"
    pub command: String,

    /// Arguments passed through verbatim (after `--`)
    #[arg(last = true)]
    pub args: Vec<String>,

    /// Act on behalf of this user (admin only)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct DeployArgs {
    /// Range config file to deploy
    #[arg(long = "range-config", value_name = "PATH")]
    pub config_path: Option<String>,

    /// Deploy even if a deployment is already running
    #[arg(long)]
    pub force: bool,

    /// Comma-separated ansible tags to run
    #[arg(long)]
    pub tags: Option<String>,

    /// Limit the deploy to these VMs
    #[arg(long)]
    pub limit: Option<String>,

    /// Only run these user-defined roles
    #[arg(long = "only-roles", value_delimiter = ',')]
    pub only_roles: Vec<String>,

    /// Verbose ansible output
    #[arg(long)]
    pub verbose_ansible: bool,

    /// Act on behalf of this user (admin only)
    #[arg(long)]
    pub user: Option<String>,
}

impl From<DeployArgs> for DeployOptions {
    fn from(args: DeployArgs) -> Self {
        DeployOptions {
            config_path: args.config_path,
            force: args.force,
            tags: args.tags,
            limit: args.limit,
            only_roles: args.only_roles,
            verbose_ansible: args.verbose_ansible,
            user: args.user,
        }
    }
}

#[derive(Args)]
pub struct HelpArgs {
    /// Operation to describe (execute, deploy, range_status, range_list, tags, user_list)
    #[arg(value_parser = parse_operation)]
    pub operation: Operation,

    /// For `execute`: the command whose help to show, e.g. "snapshot create"
    pub command: Option<String>,
}

pub(crate) fn parse_operation(name: &str) -> Result<Operation, String> {
    Operation::from_name(&name.replace('-', "_")).ok_or_else(|| {
        let known: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        format!("unknown operation `{name}` (expected one of: {})", known.join(", "))
    })
}

pub async fn exec<R: ProcessRunner>(
    args: ExecArgs,
    cli: &RangeCli<R>,
    cancel: &CancellationToken,
) -> ToolResult {
    cli.execute_arbitrary_command(&args.command, &args.args, args.user.as_deref(), cancel)
        .await
}
