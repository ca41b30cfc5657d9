// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single access point for tickets, live or from a saved session.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ztv_core::{store, Ticket};

use crate::error::{Error, Result};
use crate::remote::{Credentials, HttpTransport, RemoteClient, ReqwestTransport, User};

/// Where tickets come from. Chosen once at startup.
#[derive(Debug, Clone)]
pub enum RepositoryMode {
    /// Fetch from the API, optionally saving the result to `save_to`.
    Live {
        credentials: Credentials,
        save_to: Option<PathBuf>,
    },
    /// Replay a saved session. Never touches the network.
    Offline { path: PathBuf },
}

/// Provenance of a [`TicketSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Live {
        fetched_at: DateTime<Utc>,
        user: User,
    },
    Offline {
        path: PathBuf,
        captured_at: DateTime<Utc>,
    },
}

/// Tickets handed to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSet {
    pub tickets: Vec<Ticket>,
    /// Records dropped as malformed during a live fetch.
    pub skipped: usize,
    pub source: Source,
}

pub struct TicketRepository<T: HttpTransport = ReqwestTransport> {
    client: RemoteClient<T>,
    mode: RepositoryMode,
}

impl<T: HttpTransport> TicketRepository<T> {
    pub fn new(client: RemoteClient<T>, mode: RepositoryMode) -> Self {
        TicketRepository { client, mode }
    }

    /// Produce the ticket list for the configured mode.
    ///
    /// Live failures are returned as-is; there is no fallback to a saved
    /// session.
    pub fn fetch(&self) -> Result<TicketSet> {
        match &self.mode {
            RepositoryMode::Live {
                credentials,
                save_to,
            } => self.fetch_live(credentials, save_to.as_deref()),
            RepositoryMode::Offline { path } => load_offline(path.clone()),
        }
    }

    fn fetch_live(
        &self,
        credentials: &Credentials,
        save_to: Option<&std::path::Path>,
    ) -> Result<TicketSet> {
        if credentials.subdomain.trim().is_empty() {
            return Err(Error::MissingSetting("subdomain"));
        }
        self.client.validate_subdomain(&credentials.subdomain)?;
        let session = self.client.authenticate(credentials)?;
        let batch = self.client.list_tickets(&session)?;
        let fetched_at = Utc::now();

        if let Some(path) = save_to {
            store::save_at(path, &batch.tickets, fetched_at)?;
            tracing::info!(path = %path.display(), tickets = batch.len(), "saved session");
        }

        let skipped = batch.skipped;
        Ok(TicketSet {
            tickets: batch.into_tickets(),
            skipped,
            source: Source::Live {
                fetched_at,
                user: session.user,
            },
        })
    }
}

fn load_offline(path: PathBuf) -> Result<TicketSet> {
    let session = store::load(&path)?;
    tracing::info!(
        path = %path.display(),
        tickets = session.tickets.len(),
        captured_at = %session.captured_at,
        "loaded saved session"
    );
    Ok(TicketSet {
        tickets: session.tickets,
        skipped: 0,
        source: Source::Offline {
            path,
            captured_at: session.captured_at,
        },
    })
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
