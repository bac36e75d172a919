// Unit tests for argument parsing

use crate::cli::{Cli, CloudUrlArgs, Command};

use std::path::Path;

use clap::{CommandFactory, Parser};

#[test]
fn given_cli_definition_when_debug_asserted_then_valid() {
    Cli::command().debug_assert();
}

#[test]
fn given_login_with_short_cloud_url_when_parsed_then_url_captured() {
    let cli = Cli::try_parse_from(["nimbus", "login", "-c", "https://example.org"]).unwrap();

    let Command::Login(args) = cli.command else {
        panic!("Expected login, got {:?}", cli.command);
    };
    assert_eq!(args.cloud_url.as_deref(), Some("https://example.org"));
}

/// **VALUE**: Verifies `-v` is counted and accepted after the subcommand.
///
/// **WHY THIS MATTERS**: Users add `-vv` to the end of a failing command line. If the
/// flag were not global, they would get a usage error instead of debug logs.
///
/// **BUG THIS CATCHES**: Would catch dropping `global = true` or switching the
/// action from Count to SetTrue.
#[test]
fn given_repeated_verbose_after_subcommand_when_parsed_then_counted() {
    let cli = Cli::try_parse_from([
        "nimbus",
        "logout",
        "-vv",
        "--cloud-url",
        "https://example.org",
        "--log-file",
        "/tmp/nimbus.log",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.log_file.as_deref(), Some(Path::new("/tmp/nimbus.log")));
    assert!(matches!(cli.command, Command::Logout(_)));
}

#[test]
fn given_no_subcommand_when_parsed_then_error() {
    assert!(Cli::try_parse_from(["nimbus"]).is_err());
}

#[test]
fn given_no_cloud_url_when_resolved_then_configured_url_used() {
    let args = CloudUrlArgs { cloud_url: None };

    assert_eq!(args.resolve_or("https://nimbus.dev/"), "https://nimbus.dev/");
}

#[test]
fn given_empty_cloud_url_when_resolved_then_configured_url_used() {
    let args = CloudUrlArgs {
        cloud_url: Some(String::new()),
    };

    assert_eq!(args.resolve_or("https://nimbus.dev/"), "https://nimbus.dev/");
}

#[test]
fn given_explicit_cloud_url_when_resolved_then_it_wins() {
    let args = CloudUrlArgs {
        cloud_url: Some("https://example.org".to_string()),
    };

    assert_eq!(args.resolve_or("https://nimbus.dev/"), "https://example.org");
}
