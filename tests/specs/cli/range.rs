// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named range operations against the fake CLI

use crate::prelude::*;

#[test]
fn status_for_user_appends_impersonation_tokens() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .env("FAKE_STDOUT", r#"{"rangeState":"SUCCESS","VMs":[]}"#)
        .args(&["status", "--user", "alice"])
        .passes();

    let result = run.result();
    assert_eq!(result["success"], true);
    assert_eq!(result["data"]["rangeState"], "SUCCESS");
    assert_eq!(ludus.argv().unwrap(), vec!["range", "status", "--json", "--user", "alice"]);
}

#[test]
fn deploy_force_and_tags() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .env("FAKE_STDOUT", "Range deploy started\n")
        .args(&["deploy", "--force", "--tags", "dns,custom-groups"])
        .passes()
        .stdout_has("Range deploy started");

    assert_eq!(
        ludus.argv().unwrap(),
        vec!["range", "deploy", "--force", "--tags", "dns,custom-groups"]
    );
}

#[test]
fn exec_keeps_metacharacters_literal() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .args(&["exec", "snapshot create", "--", "--name", "a; touch /tmp/pwned", "$(id)"])
        .passes();

    assert_eq!(
        ludus.argv().unwrap(),
        vec!["snapshot", "create", "--name", "a; touch /tmp/pwned", "$(id)"]
    );
}

#[test]
fn json_output_can_be_turned_off() {
    let ludus = FakeLudus::new();
    ludus.rangewire().env("RANGEWIRE_JSON", "0").args(&["ranges"]).passes();

    assert_eq!(ludus.argv().unwrap(), vec!["range", "list"]);
}

#[test]
fn non_zero_exit_fails_with_classified_kind() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .env("FAKE_STDERR", "Error: user bob not found\n")
        .env("FAKE_EXIT", "1")
        .args(&["tags", "--user", "bob"])
        .fails();

    let result = run.result();
    assert_eq!(result["success"], false);
    assert_eq!(result["error_kind"], "not_found");
    assert_eq!(result["raw_output"], "Error: user bob not found\n");
}

#[test]
fn text_failure_goes_to_stderr() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .env("FAKE_STDERR", "Error: 403 forbidden\n")
        .env("FAKE_EXIT", "1")
        .args(&["-o", "text", "users"])
        .fails()
        .stdout_eq("")
        .stderr_has("error[permission_denied]");
}

#[test]
fn slow_command_times_out() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .env("FAKE_SLEEP", "30")
        .env("RANGEWIRE_TIMEOUT_STANDARD_MS", "200")
        .args(&["status"])
        .fails();

    let result = run.result();
    assert_eq!(result["error_kind"], "timeout");
    assert!(result["message"].as_str().unwrap().contains("timed out"));
}

#[test]
fn missing_binary_is_not_found() {
    let run = cli()
        .env("RANGEWIRE_BINARY", "/nonexistent/rangewire-test/ludus")
        .env("RANGEWIRE_CONFIG", "/nonexistent/rangewire-test/config.toml")
        .args(&["users"])
        .fails();

    assert_eq!(run.result()["error_kind"], "not_found");
}

#[test]
fn api_settings_reach_the_child() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .env("LUDUS_URL", "https://198.51.100.4:8080")
        .env("LUDUS_API_KEY", "alice.0123456789")
        .args(&["ranges"])
        .passes();

    assert_eq!(ludus.seen_env().unwrap(), "https://198.51.100.4:8080|alice.0123456789");
}
