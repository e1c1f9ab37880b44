// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rangewire: structured, injection-safe front end for the Ludus range CLI

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rangewire_core::WrapperConfig;
use rangewire_exec::RangeCli;
use tokio_util::sync::CancellationToken;

use crate::commands::Commands;
use crate::exit_error::{ExitError, EXIT_FAILED, EXIT_HOST};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "rangewire",
    version,
    about = "Structured wrapper around the Ludus range CLI",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// Wrapper config file (defaults to RANGEWIRE_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("rangewire: failed to initialize logging: {e:#}");
            return ExitCode::from(EXIT_HOST as u8);
        }
    };

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            let code = exit_error::code_for(&e);
            let message = format!("{e:#}");
            if !message.is_empty() {
                eprintln!("rangewire: {message}");
            }
            code
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(EXIT_HOST as u8))
}

async fn run(cli: Cli) -> Result<i32> {
    let config = WrapperConfig::load_from(cli.config.as_deref())
        .map_err(|e| ExitError::host(e.to_string()))?;
    tracing::debug!(?config, "loaded configuration");

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling in-flight call");
            interrupt.cancel();
        }
    });

    let facade = RangeCli::from_config(config);
    let result = commands::handle(cli.command, &facade, &cancel).await?;
    output::print(&result, cli.output)?;

    Ok(if result.success { 0 } else { EXIT_FAILED })
}
