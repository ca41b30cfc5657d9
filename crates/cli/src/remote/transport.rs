// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP requests to the helpdesk API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTPS requests for production (reqwest, blocking)
//! - Mock transports for unit testing

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, RETRY_AFTER};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Could not reach the server.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The server did not answer within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Setup(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Credentials sent as an HTTP basic auth header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub auth: Option<BasicAuth>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        HttpRequest {
            url: url.into(),
            auth: None,
        }
    }

    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// The parts of a response the client looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed `Retry-After` header, when the server sent one in seconds.
    pub retry_after: Option<Duration>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

/// Transport trait for request/response HTTP communication.
///
/// This trait abstracts over the actual HTTP client, allowing
/// for easy testing with mock implementations.
pub trait HttpTransport {
    /// Perform a GET request. Redirects are not followed.
    ///
    /// Any HTTP status is a successful transport result; only failures to
    /// exchange a request and response are errors.
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse>;
}

/// HTTPS transport implementation using the blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("ztv/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let mut builder = self
            .client
            .get(&request.url)
            .header(ACCEPT, "application/json");
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.user, Some(&auth.password));
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response
            .text()
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Parse a `Retry-After` value given in delta-seconds.
///
/// The HTTP-date form is not used by the helpdesk API and yields `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
