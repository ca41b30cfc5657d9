// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ztv-core operations.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur in ztv-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed ticket record{}: {reason}", id.map(|i| format!(" #{i}")).unwrap_or_default())]
    MalformedRecord { id: Option<u64>, reason: String },

    #[error("invalid status: '{0}'\n  hint: valid statuses are: new, open, pending, hold, solved, closed")]
    InvalidStatus(String),

    #[error("cannot read session file {}: {source}\n  hint: save one first with --pickle-tickets, or check --pickle-path", path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write session file {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {} is corrupted: {reason}\n  hint: the file was truncated, edited, or written by an incompatible version; fetch and save it again", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Builds a [`Error::MalformedRecord`] for the record with the given id.
    pub fn malformed(id: Option<u64>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            id,
            reason: reason.into(),
        }
    }

    /// Builds a [`Error::StoreCorrupt`] for the session file at `path`.
    pub fn corrupt(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Error::StoreCorrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for ztv-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
