// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use ztv_core::{store, Status, Ticket};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `ztv` running in `temp`, isolated from the caller's environment and
/// config file.
pub fn ztv(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ztv");
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("HOME", temp.path())
        .env_remove("ZENDESK_SUBDOMAIN")
        .env_remove("ZENDESK_EMAIL")
        .env_remove("ZENDESK_PASSWORD")
        .env_remove("ZTV_LOG");
    cmd
}

pub fn ticket(id: u64, subject: &str, status: Status) -> Ticket {
    let ts = Utc.with_ymd_and_hms(2018, 3, 1, 10, 0, 0).unwrap();
    Ticket {
        id,
        subject: subject.to_string(),
        description: format!("Description of {subject}"),
        requester_id: 100,
        status,
        assignee_id: None,
        ticket_type: None,
        priority: None,
        tags: Vec::new(),
        created_at: ts,
        updated_at: ts,
    }
}

/// Save a session with tickets 1, 2 and 3 at `temp/name`.
pub fn save_session(temp: &TempDir, name: &str) -> PathBuf {
    let path = temp.path().join(name);
    let tickets = vec![
        ticket(1, "Printer on fire", Status::Open),
        ticket(2, "Cannot log in", Status::Pending),
        ticket(3, "Feature request", Status::New),
    ];
    let captured = Utc.with_ymd_and_hms(2024, 1, 10, 10, 30, 0).unwrap();
    store::save_at(&path, &tickets, captured).unwrap();
    path
}
