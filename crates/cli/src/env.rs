// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Reads a variable, treating empty values as unset.
fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `ZENDESK_SUBDOMAIN` if set.
pub fn subdomain() -> Option<String> {
    non_empty(vars::ZENDESK_SUBDOMAIN)
}

/// Returns the value of `ZENDESK_EMAIL` if set.
pub fn email() -> Option<String> {
    non_empty(vars::ZENDESK_EMAIL)
}

/// Returns the value of `ZENDESK_PASSWORD` if set.
pub fn password() -> Option<String> {
    non_empty(vars::ZENDESK_PASSWORD)
}

/// Returns the tracing filter directive in `ZTV_LOG` if set.
pub fn log_filter() -> Option<String> {
    non_empty(vars::ZTV_LOG)
}

/// Returns `true` if `NO_COLOR` is set to a non-empty value.
pub fn no_color() -> bool {
    non_empty(vars::NO_COLOR).is_some()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
