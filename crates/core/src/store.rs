// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session store: saved ticket snapshots for offline viewing.
//!
//! A session file is two parts separated by the first newline:
//!
//! ```text
//! {"magic":"ztv-session","version":1,"sha256":"<hex digest of payload>"}
//! {"captured_at":"2024-01-10T10:30:00Z","tickets":[...]}
//! ```
//!
//! The digest covers every payload byte, so truncation or any edit is
//! reported as [`Error::StoreCorrupt`]. Files are replaced atomically: the
//! new content goes to a sibling temp file which is fsynced and renamed over
//! the target.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::ticket::Ticket;

/// Marker identifying a ztv session file.
pub const MAGIC: &str = "ztv-session";
/// Current session format version.
pub const FORMAT_VERSION: u32 = 1;

/// A ticket snapshot read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    /// When the tickets were fetched and saved.
    pub captured_at: DateTime<Utc>,
    /// Tickets in the order they were saved.
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    magic: String,
    version: u32,
    sha256: String,
}

#[derive(Serialize)]
struct PayloadRef<'a> {
    captured_at: DateTime<Utc>,
    tickets: &'a [Ticket],
}

#[derive(Deserialize)]
struct Payload {
    captured_at: DateTime<Utc>,
    tickets: Vec<Ticket>,
}

/// Saves `tickets` to `path`, stamped with the current time.
pub fn save(path: &Path, tickets: &[Ticket]) -> Result<()> {
    save_at(path, tickets, Utc::now())
}

/// Saves `tickets` to `path` with an explicit capture timestamp.
///
/// Any existing file at `path` is replaced atomically. On failure the
/// previous file, if any, is left untouched.
pub fn save_at(path: &Path, tickets: &[Ticket], captured_at: DateTime<Utc>) -> Result<()> {
    let bytes = encode(tickets, captured_at)?;
    let write_err = |source: io::Error| Error::StoreWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = temp_path(path);
    let result = write_synced(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }

    tracing::debug!(
        path = %path.display(),
        tickets = tickets.len(),
        bytes = bytes.len(),
        "session saved"
    );
    Ok(())
}

/// Loads a session previously written by [`save`].
///
/// # Errors
///
/// - [`Error::StoreRead`] if the file is missing or unreadable.
/// - [`Error::StoreCorrupt`] if the content is not a valid session of a
///   supported version.
pub fn load(path: &Path) -> Result<StoredSession> {
    let bytes = fs::read(path).map_err(|source| Error::StoreRead {
        path: path.to_path_buf(),
        source,
    })?;
    let session = decode(path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        tickets = session.tickets.len(),
        captured_at = %session.captured_at,
        "session loaded"
    );
    Ok(session)
}

fn encode(tickets: &[Ticket], captured_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(&PayloadRef {
        captured_at,
        tickets,
    })?;
    let header = Header {
        magic: MAGIC.to_string(),
        version: FORMAT_VERSION,
        sha256: hex::encode(Sha256::digest(&payload)),
    };

    let mut bytes = serde_json::to_vec(&header)?;
    bytes.push(b'\n');
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

fn decode(path: &Path, bytes: &[u8]) -> Result<StoredSession> {
    let split = bytes
        .iter()
        .position(|b| *b == b'\n')
        .ok_or_else(|| Error::corrupt(path, "missing header"))?;
    let (header_bytes, payload) = (&bytes[..split], &bytes[split + 1..]);

    let header: Header = serde_json::from_slice(header_bytes)
        .map_err(|e| Error::corrupt(path, format!("unreadable header: {e}")))?;
    if header.magic != MAGIC {
        return Err(Error::corrupt(path, "not a ztv session file"));
    }
    if header.version != FORMAT_VERSION {
        return Err(Error::corrupt(
            path,
            format!(
                "unsupported format version {} (expected {})",
                header.version, FORMAT_VERSION
            ),
        ));
    }
    if hex::encode(Sha256::digest(payload)) != header.sha256 {
        return Err(Error::corrupt(path, "checksum mismatch"));
    }

    let payload: Payload = serde_json::from_slice(payload)
        .map_err(|e| Error::corrupt(path, format!("unreadable tickets: {e}")))?;

    let mut seen = HashSet::new();
    if let Some(dup) = payload.tickets.iter().find(|t| !seen.insert(t.id)) {
        return Err(Error::corrupt(path, format!("duplicate ticket id {}", dup.id)));
    }

    Ok(StoredSession {
        captured_at: payload.captured_at,
        tickets: payload.tickets,
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "session".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
