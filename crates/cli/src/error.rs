// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

use crate::remote::RemoteError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NETWORK: i32 = 4;
    pub const STORE_READ: i32 = 5;
    pub const STORE_WRITE: i32 = 6;
}

/// All possible errors that can occur in the ztv CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed (HTTP {status}): {message}\n  hint: check --email and --password, or pass --token when using an API token")]
    Auth { status: u16, message: String },

    #[error("subdomain '{0}' does not exist\n  hint: use <name> from https://<name>.zendesk.com")]
    UnknownSubdomain(String),

    #[error("network error: {0}\n  hint: check your internet connection, or raise --timeout")]
    Network(String),

    #[error("rate limited by the server{}\n  hint: wait a moment and try again", retry_after.map(|s| format!(" (retry after {s}s)")).unwrap_or_default())]
    RateLimited { retry_after: Option<u64> },

    #[error("unexpected HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("{0} is required for live mode\n  hint: pass --{0}, set it in the config file, or use --unpickle-tickets to view a saved session")]
    MissingSetting(&'static str),

    #[error("invalid config file {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Core(#[from] ztv_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ztv operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth { .. } | Error::UnknownSubdomain(_) => exit_code::AUTH,
            Error::Network(_) | Error::RateLimited { .. } => exit_code::NETWORK,
            Error::Core(ztv_core::Error::StoreRead { .. })
            | Error::Core(ztv_core::Error::StoreCorrupt { .. }) => exit_code::STORE_READ,
            Error::Core(ztv_core::Error::StoreWrite { .. }) => exit_code::STORE_WRITE,
            _ => exit_code::FAILURE,
        }
    }
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Auth { status, message } => Error::Auth { status, message },
            RemoteError::UnknownSubdomain(s) => Error::UnknownSubdomain(s),
            RemoteError::Network(msg) => Error::Network(msg),
            RemoteError::ServerError { status, .. } => {
                Error::Network(format!("server error (HTTP {status})"))
            }
            RemoteError::Setup(msg) => Error::Network(format!("http client setup failed: {msg}")),
            RemoteError::RateLimited { retry_after } => Error::RateLimited {
                retry_after: retry_after.map(|d| d.as_secs()),
            },
            RemoteError::UnexpectedStatus { status, url } => {
                Error::UnexpectedStatus { status, url }
            }
            RemoteError::InvalidResponse { url, reason } => Error::InvalidResponse { url, reason },
            RemoteError::Record(e) => Error::Core(e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
