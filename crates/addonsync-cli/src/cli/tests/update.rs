//! Tests for the update subcommand, global flags and status lines.

use super::parse;
use crate::cli::commands::format_record;
use crate::cli::{Cli, CliCommand, PolicyArg};
use addonsync_core::config::UpdatePolicy;
use addonsync_core::sync::RecordStatus;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_update_defaults() {
    match parse(&["addonsync", "update"]) {
        CliCommand::Update { list, policy } => {
            assert!(list.is_none());
            assert!(policy.is_none());
        }
        _ => panic!("expected Update"),
    }
}

#[test]
fn cli_parse_update_list_and_policy() {
    match parse(&[
        "addonsync",
        "update",
        "--list",
        "/presets/update-addons-list.json",
        "--policy",
        "replace",
    ]) {
        CliCommand::Update { list, policy } => {
            assert_eq!(
                list.as_deref(),
                Some(Path::new("/presets/update-addons-list.json"))
            );
            assert_eq!(policy, Some(PolicyArg::Replace));
            assert_eq!(UpdatePolicy::from(PolicyArg::Replace), UpdatePolicy::Replace);
        }
        _ => panic!("expected Update with --list and --policy"),
    }
}

#[test]
fn cli_parse_update_rejects_unknown_policy() {
    assert!(Cli::try_parse_from(["addonsync", "update", "--policy", "merge"]).is_err());
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["addonsync", "update", "--config", "/tmp/c.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/c.toml")));
}

#[test]
fn cli_parse_completions() {
    match parse(&["addonsync", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn status_lines() {
    let up = RecordStatus::UpToDate {
        name: "Cinemeta".to_string(),
    };
    assert_eq!(
        format_record(&up, "en.json").as_deref(),
        Some("  Cinemeta is up to date in en.json")
    );

    let updated = RecordStatus::Updated {
        name: "Torrentio".to_string(),
        from: Some("0.0.14".to_string()),
        to: "0.0.15".to_string(),
    };
    assert_eq!(
        format_record(&updated, "en.json").as_deref(),
        Some("  Updating Torrentio from version 0.0.14 to 0.0.15")
    );

    let offline = RecordStatus::LocalSourceOffline {
        name: "Local Files".to_string(),
    };
    assert!(format_record(&offline, "en.json").is_none());
}
