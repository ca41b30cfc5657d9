// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup.
//!
//! The terminal belongs to the viewer, so logs go to a file. If the file
//! cannot be opened they go to stderr instead.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Directive used when the configured one does not parse.
const FALLBACK_FILTER: &str = "warn";

/// Build a filter from a directive, falling back to warn-level logging.
pub fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(log_path: &Path, directive: &str) {
    let filter = filter(directive);

    let installed = match fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init()
            .is_ok(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            log_file = %log_path.display(),
            "logging initialized"
        );
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
