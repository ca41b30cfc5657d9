// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Access to the live helpdesk API.
//!
//! The [`RemoteClient`] talks to the API through an [`HttpTransport`], so
//! tests can swap in a scripted transport without opening sockets.

mod client;
mod retry;
mod transport;

pub use client::{
    base_url, ClientOptions, Credentials, RemoteClient, RemoteError, RemoteResult, Session, User,
    MAX_PAGE_SIZE,
};
pub use retry::RetryPolicy;
pub use transport::{
    BasicAuth, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
    TransportResult,
};

#[cfg(test)]
use client::{check_transient, is_same_origin};


#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
