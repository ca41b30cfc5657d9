// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How tickets are presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Interactive list/detail view (falls back to text when not a terminal)
    #[default]
    Tui,
    /// One line per ticket
    Text,
    /// JSON array of tickets
    Json,
}

/// Log level threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    #[value(alias = "critical")]
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

// Custom help template with the exit codes below the options
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

Options:
{options}{after-help}";

const AFTER_HELP: &str = "\
Examples:
  ztv --subdomain acme --email me@acme.com --password ...    View live tickets
  ztv --subdomain acme ... --pickle-tickets                   View and save for later
  ztv --unpickle-tickets                                      View the saved session
  ztv --unpickle-tickets --output json                        Dump the saved session

Environment:
  ZENDESK_SUBDOMAIN, ZENDESK_EMAIL, ZENDESK_PASSWORD   Live mode credentials
  ZTV_LOG                                              Log filter (overrides --verbosity)
  NO_COLOR                                             Disable highlighting in the viewer

Exit codes:
  0  success
  1  generic failure
  2  usage error
  3  authentication failed or unknown subdomain
  4  network failure or rate limited
  5  saved session missing, unreadable or corrupt
  6  saving the session failed";

#[derive(Parser, Debug, Default)]
#[command(name = "ztv", version)]
#[command(about = "View helpdesk tickets in the terminal, live or from a saved session")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Account subdomain (<name> in https://<name>.zendesk.com)
    #[arg(long, conflicts_with = "unpickle_tickets")]
    pub subdomain: Option<String>,

    /// Account email address
    #[arg(long, conflicts_with = "unpickle_tickets")]
    pub email: Option<String>,

    /// Account password, or API token with --token
    #[arg(long, conflicts_with = "unpickle_tickets")]
    pub password: Option<String>,

    /// Treat the password as an API token
    #[arg(long, conflicts_with = "unpickle_tickets")]
    pub token: bool,

    /// Load tickets from the saved session instead of the API
    #[arg(long)]
    pub unpickle_tickets: bool,

    /// Save fetched tickets to the session file
    #[arg(long, conflicts_with = "unpickle_tickets")]
    pub pickle_tickets: bool,

    /// Session file path [default: tickets.pkl]
    #[arg(long, value_name = "PATH")]
    pub pickle_path: Option<PathBuf>,

    /// Config file [default: <config dir>/ztv/config.toml]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Request timeout in seconds [default: 5]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Tickets per page [default: 100]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Retries for network failures and rate limiting [default: 3]
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Abort instead of skipping malformed ticket records
    #[arg(long)]
    pub strict: bool,

    /// Log file [default: .ztv.log]
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level [default: warn]
    #[arg(long, value_enum)]
    pub verbosity: Option<Verbosity>,

    /// Output format [default: tui]
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputFormat>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
