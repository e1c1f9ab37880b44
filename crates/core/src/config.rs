// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide wrapper configuration.
//!
//! Loaded once at startup from an optional TOML file plus environment
//! overrides, then shared read-only by every operation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-call timeout budgets, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutProfile {
    /// Help text and other trivially fast calls.
    pub quick_ms: u64,
    /// Status, list and arbitrary commands.
    pub standard_ms: u64,
    /// Deploy initiation. The CLI returns once the deployment is queued.
    pub deploy_ms: u64,
}

impl Default for TimeoutProfile {
    fn default() -> Self {
        Self { quick_ms: 15_000, standard_ms: 60_000, deploy_ms: 120_000 }
    }
}

impl TimeoutProfile {
    pub fn quick(&self) -> Duration {
        Duration::from_millis(self.quick_ms)
    }

    pub fn standard(&self) -> Duration {
        Duration::from_millis(self.standard_ms)
    }

    pub fn deploy(&self) -> Duration {
        Duration::from_millis(self.deploy_ms)
    }
}

/// Settings shared by every wrapped invocation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WrapperConfig {
    /// Range CLI program, resolved through `PATH` when it is a bare name.
    pub binary: String,
    /// API endpoint exported to the CLI as `LUDUS_URL`.
    pub api_url: Option<String>,
    /// API key exported to the CLI as `LUDUS_API_KEY`.
    pub api_key: Option<String>,
    /// Append `--json` to operations that return structured data.
    pub json_output: bool,
    pub timeouts: TimeoutProfile,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            binary: "ludus".to_string(),
            api_url: None,
            api_key: None,
            json_output: true,
            timeouts: TimeoutProfile::default(),
        }
    }
}

// Keep the credential out of logs.
impl fmt::Debug for WrapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperConfig")
            .field("binary", &self.binary)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("json_output", &self.json_output)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl WrapperConfig {
    /// Load the config file (when present), apply environment overrides, validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load), but an explicit `path` replaces the default
    /// location and must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => match env::config_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Overlay environment variables on top of file values.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(binary) = env::binary() {
            self.binary = binary;
        }
        if let Some(url) = env::api_url() {
            self.api_url = Some(url);
        }
        if let Some(key) = env::api_key() {
            self.api_key = Some(key);
        }
        if let Some(json) = env::json_output() {
            self.json_output = json;
        }
        if let Some(t) = env::timeout_ms("quick").map_err(ConfigError::Invalid)? {
            self.timeouts.quick_ms = millis(t);
        }
        if let Some(t) = env::timeout_ms("standard").map_err(ConfigError::Invalid)? {
            self.timeouts.standard_ms = millis(t);
        }
        if let Some(t) = env::timeout_ms("deploy").map_err(ConfigError::Invalid)? {
            self.timeouts.deploy_ms = millis(t);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binary.trim().is_empty() {
            return Err(ConfigError::Invalid("binary must not be empty".to_string()));
        }
        if self.binary.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "binary must be a program name or path, not a command line: {:?}",
                self.binary
            )));
        }
        let t = &self.timeouts;
        let budgets = [("quick", t.quick_ms), ("standard", t.standard_ms), ("deploy", t.deploy_ms)];
        for (name, ms) in budgets {
            if ms == 0 {
                return Err(ConfigError::Invalid(format!("timeouts.{name}_ms must be > 0")));
            }
        }
        Ok(())
    }

    /// Variables exported to the child process on top of the inherited environment.
    pub fn child_env(&self) -> Vec<(&'static str, String)> {
        let mut vars = Vec::new();
        if let Some(url) = &self.api_url {
            vars.push((env::API_URL_VAR, url.clone()));
        }
        if let Some(key) = &self.api_key {
            vars.push((env::API_KEY_VAR, key.clone()));
        }
        vars
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
