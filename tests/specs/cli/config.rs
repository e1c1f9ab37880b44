// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wrapper configuration specs

use crate::prelude::*;

#[test]
fn config_file_sets_binary_and_json_mode() {
    let ludus = FakeLudus::new();
    let config = ludus.config(&format!(
        "binary = \"{}\"\njson_output = false\n",
        ludus.path().display()
    ));

    cli()
        .args(&["--config", config.to_str().unwrap(), "status"])
        .passes();

    assert_eq!(ludus.argv().unwrap(), vec!["range", "status"]);
}

#[test]
fn invalid_config_is_a_host_error() {
    let ludus = FakeLudus::new();
    let config = ludus.config("timeouts = { quick_ms = 0 }\n");

    ludus
        .rangewire()
        .args(&["--config", config.to_str().unwrap(), "users"])
        .exits_with(2)
        .stderr_has("quick_ms");
    assert!(ludus.argv().is_none());
}

#[test]
fn missing_explicit_config_is_a_host_error() {
    cli()
        .args(&["--config", "/nonexistent/rangewire-test/config.toml", "users"])
        .exits_with(2)
        .stderr_has("failed to read config");
}

#[test]
fn unknown_config_key_is_rejected() {
    let ludus = FakeLudus::new();
    let config = ludus.config("shell = true\n");

    ludus
        .rangewire()
        .args(&["--config", config.to_str().unwrap(), "users"])
        .exits_with(2)
        .stderr_has("shell");
}

#[test]
fn unparseable_timeout_env_is_a_host_error() {
    let ludus = FakeLudus::new();

    ludus
        .rangewire()
        .env("RANGEWIRE_TIMEOUT_STANDARD_MS", "abc")
        .args(&["users"])
        .exits_with(2)
        .stderr_has("RANGEWIRE_TIMEOUT_STANDARD_MS");
    assert!(ludus.argv().is_none());
}
