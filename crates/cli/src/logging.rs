// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriber setup. Stdout is reserved for results, so logs go to stderr
//! or, with `RANGEWIRE_LOG_FILE`, to a non-blocking file writer.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use rangewire_core::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let filter = filter(env::log_filter().as_deref());
    match env::log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log(&path)?);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok(None)
        }
    }
}

/// Parse a filter directive, falling back to [`DEFAULT_DIRECTIVE`] when it is
/// absent or malformed.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn open_log(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
