// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ztv - view helpdesk tickets in the terminal.
//!
//! This crate provides the `ztv` CLI: it fetches the tickets of one account
//! from the helpdesk REST API, or replays a session saved earlier, and shows
//! them in an interactive viewer or as plain text/JSON.
//!
//! # Main Components
//!
//! - [`remote`] - API client behind a swappable HTTP transport
//! - [`TicketRepository`] - picks live or saved tickets, once per run
//! - [`config`] - settings from flags, environment and config file
//! - [`Error`] - error types and exit codes
//!
//! ```rust,ignore
//! use ztv::remote::{ClientOptions, Credentials, RemoteClient};
//! use ztv::{RepositoryMode, TicketRepository};
//!
//! let client = RemoteClient::new(ClientOptions::default(), Duration::from_secs(5))?;
//! let mode = RepositoryMode::Offline { path: "tickets.pkl".into() };
//! let set = TicketRepository::new(client, mode).fetch()?;
//! ```

mod cli;
mod display;
mod env;
mod logging;
mod tui;

pub mod config;
pub mod error;
pub mod remote;
pub mod repository;

pub use cli::{Cli, OutputFormat, Verbosity};
pub use config::Settings;
pub use error::{exit_code, Error, Result};
pub use repository::{RepositoryMode, Source, TicketRepository, TicketSet};

use std::io::{self, IsTerminal, Write};

use config::{EnvConfig, FileConfig};
use remote::RemoteClient;

/// Run the viewer for parsed command-line arguments.
///
/// Logging is installed once the settings are known; everything after that
/// is logged to the configured log file.
pub fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::load(cli.config_file.as_deref())?;
    let settings = Settings::resolve(&cli, &EnvConfig::from_env(), &file)?;
    logging::init(&settings.log_file, &settings.log_filter);
    tracing::debug!(?settings, "resolved settings");

    let mode = settings.repository_mode()?;
    let client = RemoteClient::new(settings.client_options(), settings.timeout)?;
    let set = TicketRepository::new(client, mode).fetch()?;
    tracing::info!(
        tickets = set.tickets.len(),
        skipped = set.skipped,
        "tickets ready"
    );

    show(&set, &settings)
}

fn show(set: &TicketSet, settings: &Settings) -> Result<()> {
    let format = match settings.output {
        OutputFormat::Tui if !io::stdout().is_terminal() => {
            tracing::info!("stdout is not a terminal, using text output");
            OutputFormat::Text
        }
        other => other,
    };

    match format {
        OutputFormat::Tui => tui::run(set, settings.no_color)?,
        OutputFormat::Text => {
            let mut out = io::stdout().lock();
            display::write_text(&mut out, set)?;
            out.flush()?;
        }
        OutputFormat::Json => {
            let mut out = io::stdout().lock();
            display::write_json(&mut out, set)?;
            out.flush()?;
        }
    }

    if let Some(notice) = display::skipped_notice(set.skipped) {
        eprintln!("{notice}");
    }
    Ok(())
}
