// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod range;
pub mod tool;

use anyhow::Result;
use clap::Subcommand;
use rangewire_core::ToolResult;
use rangewire_exec::{ProcessRunner, RangeCli};
use tokio_util::sync::CancellationToken;

#[derive(Subcommand)]
pub enum Commands {
    /// Run any range CLI command with literal arguments
    Exec(range::ExecArgs),
    /// Deploy or redeploy a range
    Deploy(range::DeployArgs),
    /// Show the state of a range and its VMs
    Status(range::UserArgs),
    /// List ranges
    Ranges(range::UserArgs),
    /// List the ansible tags a deploy can be limited to
    Tags(range::UserArgs),
    /// List every user (admin only)
    Users,
    /// Show the range CLI's help for an operation
    HelpFor(range::HelpArgs),
    /// Dispatch a JSON tool call
    Tool(tool::ToolArgs),
}

pub async fn handle<R: ProcessRunner>(
    command: Commands,
    cli: &RangeCli<R>,
    cancel: &CancellationToken,
) -> Result<ToolResult> {
    let result = match command {
        Commands::Exec(args) => range::exec(args, cli, cancel).await,
        Commands::Deploy(args) => cli.deploy_range(&args.into(), cancel).await,
        Commands::Status(args) => cli.get_range_status(args.user.as_deref(), cancel).await,
        Commands::Ranges(args) => cli.list_user_ranges(args.user.as_deref(), cancel).await,
        Commands::Tags(args) => cli.get_tags(args.user.as_deref(), cancel).await,
        Commands::Users => cli.list_all_users(cancel).await,
        Commands::HelpFor(args) => {
            cli.help(args.operation, args.command.as_deref(), cancel).await
        }
        Commands::Tool(args) => return tool::handle(args, cli, cancel).await,
    };
    Ok(result)
}
