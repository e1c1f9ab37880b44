// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::commands::Commands;
use clap::Parser;
use yare::parameterized;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Commands,
}

fn parse(args: &[&str]) -> Commands {
    TestCli::try_parse_from(std::iter::once("rangewire").chain(args.iter().copied()))
        .unwrap()
        .command
}

#[parameterized(
    snake = { "range_status", Operation::RangeStatus },
    kebab = { "user-list", Operation::UserList },
    plain = { "deploy", Operation::Deploy },
)]
fn operation_names(name: &str, expected: Operation) {
    assert_eq!(parse_operation(name), Ok(expected));
}

#[test]
fn unknown_operation_lists_known_ones() {
    let err = parse_operation("destroy").unwrap_err();
    assert!(err.contains("destroy"));
    assert!(err.contains("range_list"));
}

#[test]
fn deploy_flags_map_to_options() {
    let Commands::Deploy(args) = parse(&[
        "deploy",
        "--force",
        "--tags",
        "dns,custom-groups",
        "--only-roles",
        "ludus_adcs,ludus_sccm",
        "--range-config",
        "/tmp/range.yml",
        "--user",
        "alice",
    ]) else {
        panic!("expected deploy");
    };

    let options = DeployOptions::from(args);

    assert_eq!(
        options,
        DeployOptions {
            config_path: Some("/tmp/range.yml".to_string()),
            force: true,
            tags: Some("dns,custom-groups".to_string()),
            limit: None,
            only_roles: vec!["ludus_adcs".to_string(), "ludus_sccm".to_string()],
            verbose_ansible: false,
            user: Some("alice".to_string()),
        }
    );
}

#[test]
fn exec_takes_literal_arguments_after_separator() {
    let Commands::Exec(args) =
        parse(&["exec", "--user", "bob", "snapshot create", "--", "--name", "a b; c"])
    else {
        panic!("expected exec");
    };

    assert_eq!(args.command, "snapshot create");
    assert_eq!(args.args, vec!["--name", "a b; c"]);
    assert_eq!(args.user.as_deref(), Some("bob"));
}

#[test]
fn help_for_takes_optional_command() {
    let Commands::HelpFor(args) = parse(&["help-for", "execute", "range logs"]) else {
        panic!("expected help-for");
    };

    assert_eq!(args.operation, Operation::Execute);
    assert_eq!(args.command.as_deref(), Some("range logs"));
}
