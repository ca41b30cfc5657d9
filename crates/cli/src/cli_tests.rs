// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use clap::error::ErrorKind;
use clap::CommandFactory;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("ztv").chain(args.iter().copied()))
}

#[test]
fn verify_command() {
    Cli::command().debug_assert();
}

#[test]
fn no_arguments_is_all_defaults() {
    let cli = parse(&[]).unwrap();
    assert!(!cli.unpickle_tickets);
    assert!(!cli.pickle_tickets);
    assert_eq!(cli.subdomain, None);
    assert_eq!(cli.output, None);
    assert_eq!(cli.verbosity, None);
}

#[test]
fn live_flags_parse() {
    let cli = parse(&[
        "--subdomain",
        "acme",
        "--email",
        "me@acme.com",
        "--password",
        "secret",
        "--token",
        "--pickle-tickets",
        "--pickle-path",
        "out.pkl",
    ])
    .unwrap();
    assert_eq!(cli.subdomain.as_deref(), Some("acme"));
    assert!(cli.token);
    assert!(cli.pickle_tickets);
    assert_eq!(cli.pickle_path, Some(PathBuf::from("out.pkl")));
}

#[parameterized(
    subdomain = { &["--unpickle-tickets", "--subdomain", "acme"] },
    email = { &["--unpickle-tickets", "--email", "me@acme.com"] },
    password = { &["--unpickle-tickets", "--password", "x"] },
    pickle = { &["--unpickle-tickets", "--pickle-tickets"] },
    token = { &["--unpickle-tickets", "--token"] },
)]
fn offline_conflicts_with_live_flags(args: &[&str]) {
    let err = parse(args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[parameterized(
    zero = { "0" },
    too_big = { "101" },
    not_a_number = { "lots" },
)]
fn page_size_out_of_range_is_rejected(value: &str) {
    assert!(parse(&["--page-size", value]).is_err());
}

#[test]
fn page_size_bounds_accepted() {
    assert_eq!(parse(&["--page-size", "1"]).unwrap().page_size, Some(1));
    assert_eq!(parse(&["--page-size", "100"]).unwrap().page_size, Some(100));
}

#[parameterized(
    critical = { "critical", Verbosity::Error },
    error = { "error", Verbosity::Error },
    warn = { "warn", Verbosity::Warn },
    info = { "info", Verbosity::Info },
    debug = { "debug", Verbosity::Debug },
    trace = { "trace", Verbosity::Trace },
)]
fn verbosity_values(value: &str, expected: Verbosity) {
    assert_eq!(
        parse(&["--verbosity", value]).unwrap().verbosity,
        Some(expected)
    );
}

#[parameterized(
    tui = { "tui", OutputFormat::Tui },
    text = { "text", OutputFormat::Text },
    json = { "json", OutputFormat::Json },
)]
fn output_values(value: &str, expected: OutputFormat) {
    assert_eq!(parse(&["--output", value]).unwrap().output, Some(expected));
}

#[test]
fn config_file_short_flag() {
    let cli = parse(&["-c", "ztv.toml"]).unwrap();
    assert_eq!(cli.config_file, Some(PathBuf::from("ztv.toml")));
}

#[test]
fn help_lists_exit_codes() {
    let help = Cli::command().render_long_help().to_string();
    assert!(help.contains("Exit codes:"));
    assert!(help.contains("5  saved session missing"));
}
