// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for rangewire.

use std::path::PathBuf;
use std::time::Duration;

/// Endpoint variable understood by the range CLI.
pub const API_URL_VAR: &str = "LUDUS_URL";
/// Credential variable understood by the range CLI.
pub const API_KEY_VAR: &str = "LUDUS_API_KEY";

/// Resolve config file: RANGEWIRE_CONFIG > XDG_CONFIG_HOME/rangewire > platform config dir
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("RANGEWIRE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("rangewire/config.toml"));
    }
    dirs::config_dir().map(|dir| dir.join("rangewire/config.toml"))
}

/// Range CLI program override.
pub fn binary() -> Option<String> {
    non_empty("RANGEWIRE_BINARY")
}

pub fn api_url() -> Option<String> {
    non_empty(API_URL_VAR)
}

pub fn api_key() -> Option<String> {
    non_empty(API_KEY_VAR)
}

/// Whether structured operations request `--json` output (`RANGEWIRE_JSON=0` disables).
pub fn json_output() -> Option<bool> {
    std::env::var("RANGEWIRE_JSON").ok().map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
}

/// Timeout override for a named profile, e.g. `RANGEWIRE_TIMEOUT_DEPLOY_MS`.
///
/// A set but unparseable value is an error naming the variable.
pub fn timeout_ms(profile: &str) -> Result<Option<Duration>, String> {
    let var = format!("RANGEWIRE_TIMEOUT_{}_MS", profile.to_ascii_uppercase());
    let Ok(value) = std::env::var(&var) else {
        return Ok(None);
    };
    value.trim().parse::<u64>().map(|ms| Some(Duration::from_millis(ms))).map_err(|_| {
        format!("{var} must be a whole number of milliseconds, got {value:?}")
    })
}

/// Log filter directive (`RANGEWIRE_LOG`), e.g. `info` or `rangewire_exec=debug`.
pub fn log_filter() -> Option<String> {
    non_empty("RANGEWIRE_LOG")
}

/// Log to this file instead of stderr (`RANGEWIRE_LOG_FILE`).
pub fn log_file() -> Option<PathBuf> {
    non_empty("RANGEWIRE_LOG_FILE").map(PathBuf::from)
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}
