// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scripted stand-in for the range CLI and a fluent runner.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment cannot leak in.
const HOST_VARS: &[&str] = &[
    "RANGEWIRE_BINARY",
    "RANGEWIRE_JSON",
    "RANGEWIRE_LOG",
    "RANGEWIRE_LOG_FILE",
    "RANGEWIRE_TIMEOUT_QUICK_MS",
    "RANGEWIRE_TIMEOUT_STANDARD_MS",
    "RANGEWIRE_TIMEOUT_DEPLOY_MS",
    "LUDUS_URL",
    "LUDUS_API_KEY",
    "NO_COLOR",
    "COLOR",
];

/// A fake `ludus` that records its argv and prints what it is told to.
///
/// Behavior is driven by `FAKE_STDOUT`, `FAKE_STDERR`, `FAKE_EXIT` and
/// `FAKE_SLEEP` in the child's environment.
pub struct FakeLudus {
    dir: TempDir,
}

impl FakeLudus {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let argv = dir.path().join("argv");
        let env = dir.path().join("env");
        let script = format!(
            r#"#!/bin/sh
printf '%s\n' "$@" > '{argv}'
printf '%s|%s' "$LUDUS_URL" "$LUDUS_API_KEY" > '{env}'
if [ -n "$FAKE_SLEEP" ]; then sleep "$FAKE_SLEEP"; fi
printf '%s' "$FAKE_STDOUT"
printf '%s' "$FAKE_STDERR" >&2
exit "${{FAKE_EXIT:-0}}"
"#,
            argv = argv.display(),
            env = env.display(),
        );
        let path = dir.path().join("ludus");
        std::fs::write(&path, script).unwrap();
        make_executable(&path);
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("ludus")
    }

    /// Argv of the last invocation, or `None` if the CLI never ran.
    pub fn argv(&self) -> Option<Vec<String>> {
        let text = std::fs::read_to_string(self.dir.path().join("argv")).ok()?;
        Some(text.lines().map(str::to_string).collect())
    }

    /// `LUDUS_URL|LUDUS_API_KEY` as seen by the last invocation.
    pub fn seen_env(&self) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("env")).ok()
    }

    /// Write a wrapper config file next to the script.
    pub fn config(&self, toml: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        std::fs::write(&path, toml).unwrap();
        path
    }

    /// `rangewire` pointed at this fake with a clean environment.
    pub fn rangewire(&self) -> CliBuilder {
        cli()
            .env("RANGEWIRE_BINARY", self.path().to_string_lossy().as_ref())
            .env("RANGEWIRE_CONFIG", self.dir.path().join("absent.toml").to_string_lossy().as_ref())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// `rangewire` with host variables removed.
pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("rangewire").unwrap();
    for var in HOST_VARS {
        cmd.env_remove(var);
    }
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Run and expect exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits_with(0)
    }

    /// Run and expect exit code 1 (the wrapped command failed).
    pub fn fails(self) -> RunAssert {
        self.exits_with(1)
    }

    pub fn exits_with(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        assert_eq!(
            run.code,
            Some(code),
            "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            run.stdout,
            run.stderr
        );
        run
    }
}

pub struct RunAssert {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    /// Stdout parsed as the JSON-rendered result.
    pub fn result(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
