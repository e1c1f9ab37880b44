// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn rangewire_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("deploy")
        .stdout_has("status")
        .stdout_has("help-for")
        .stdout_has("tool");
}

#[test]
fn rangewire_without_subcommand_is_a_usage_error() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn rangewire_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn help_for_passes_help_text_through() {
    let ludus = FakeLudus::new();
    let run = ludus
        .rangewire()
        .env("FAKE_STDOUT", "Deploy a range\n\nUsage:\n  ludus range deploy [flags]\n")
        .args(&["help-for", "deploy"])
        .passes();

    let result = run.result();
    assert_eq!(result["success"], true);
    assert!(result.get("data").is_none());
    assert_eq!(result["message"], "Deploy a range\n\nUsage:\n  ludus range deploy [flags]\n");
    assert_eq!(ludus.argv().unwrap(), vec!["range", "deploy", "--help"]);
}

#[test]
fn help_for_in_text_mode_prints_usage() {
    let ludus = FakeLudus::new();
    ludus
        .rangewire()
        .env("FAKE_STDOUT", "Usage:\n  ludus users list [flags]\n")
        .args(&["--output", "text", "help-for", "user-list"])
        .passes()
        .stdout_eq("Usage:\n  ludus users list [flags]\n");
}

#[test]
fn help_for_unknown_operation_is_rejected() {
    let ludus = FakeLudus::new();
    ludus.rangewire().args(&["help-for", "destroy"]).exits_with(2).stderr_has("destroy");
    assert!(ludus.argv().is_none());
}
