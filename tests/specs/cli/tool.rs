// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON tool call specs

use crate::prelude::*;

#[test]
fn tool_call_from_argument() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .env("FAKE_STDOUT", r#"[{"name":"dns"},{"name":"custom-groups"}]"#)
        .args(&["tool", r#"{"tool": "get_tags", "arguments": {"user": "alice"}}"#])
        .passes();

    assert_eq!(run.result()["data"][1]["name"], "custom-groups");
    assert_eq!(ludus.argv().unwrap(), vec!["range", "gettags", "--json", "--user", "alice"]);
}

#[test]
fn tool_call_from_stdin() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .args(&["tool"])
        .stdin(r#"{"tool": "deploy_range", "arguments": {"only_roles": ["ludus_adcs"]}}"#)
        .passes();

    assert_eq!(ludus.argv().unwrap(), vec!["range", "deploy", "--only-roles", "ludus_adcs"]);
}

#[test]
fn invalid_json_is_a_parse_failure() {
    let ludus = FakeLudus::new();
    let run = ludus.rangewire().args(&["tool", "{not json"]).fails();

    assert_eq!(run.result()["error_kind"], "parse_failure");
    assert!(ludus.argv().is_none());
}

#[test]
fn unknown_option_never_spawns() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .args(&["tool", r#"{"tool": "deploy_range", "arguments": {"command": "rm -rf /"}}"#])
        .fails();

    assert_eq!(run.result()["error_kind"], "invalid_argument");
    assert!(ludus.argv().is_none());
}

#[test]
fn help_argument_selects_help() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .env("FAKE_STDOUT", "Usage: ludus range status\n")
        .args(&["tool", r#"{"tool": "get_range_status", "arguments": {"help": true}}"#])
        .passes()
        .stdout_has("Usage: ludus range status");

    assert_eq!(ludus.argv().unwrap(), vec!["range", "status", "--help"]);
}

#[test]
fn tool_list_describes_every_tool() {
    let run = cli()
        .env("RANGEWIRE_CONFIG", "/nonexistent/rangewire-test/config.toml")
        .args(&["tool", "--list"])
        .passes();

    let tools = run.result()["data"].as_array().unwrap().clone();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "execute_command",
            "deploy_range",
            "get_range_status",
            "list_user_ranges",
            "get_tags",
            "list_all_users"
        ]
    );
}
