// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client for the helpdesk REST API.
//!
//! Provides a high-level interface for:
//! - Checking that a subdomain exists
//! - Authenticating with basic auth (password or API token)
//! - Fetching every page of the ticket list
//! - Retrying transient failures with bounded backoff

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use ztv_core::{MalformedPolicy, TicketBatch};

use super::retry::RetryPolicy;
use super::transport::{
    BasicAuth, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Options for the remote client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Tickets requested per page (1..=100).
    pub page_size: u32,
    /// Retry behavior for transient failures.
    pub retry: RetryPolicy,
    /// Handling of records that fail validation.
    pub malformed: MalformedPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            page_size: MAX_PAGE_SIZE,
            retry: RetryPolicy::default(),
            malformed: MalformedPolicy::Skip,
        }
    }
}

/// Error type for remote client operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("authentication failed (HTTP {status}): {message}\n  hint: check --email and --password, or pass --token when using an API token")]
    Auth { status: u16, message: String },

    #[error("network error: {0}\n  hint: check your internet connection, or raise --timeout")]
    Network(String),

    #[error("server error (HTTP {status})\n  hint: the service may be degraded, try again shortly")]
    ServerError {
        status: u16,
        retry_after: Option<Duration>,
    },

    #[error("rate limited by the server{}\n  hint: wait a moment and try again, or lower --max-retries to fail fast", retry_after.map(|d| format!(" (retry after {}s)", d.as_secs())).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    #[error("subdomain '{0}' does not exist\n  hint: use <name> from https://<name>.zendesk.com")]
    UnknownSubdomain(String),

    #[error("unexpected HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("http client setup failed: {0}")]
    Setup(String),

    #[error(transparent)]
    Record(#[from] ztv_core::Error),
}

impl RemoteError {
    /// Returns true for failures worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RemoteError::Network(_)
                | RemoteError::ServerError { .. }
                | RemoteError::RateLimited { .. }
        )
    }

    pub(super) fn retry_after(&self) -> Option<Duration> {
        match self {
            RemoteError::RateLimited { retry_after }
            | RemoteError::ServerError { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<TransportError> for RemoteError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Setup(msg) => RemoteError::Setup(msg),
            other => RemoteError::Network(other.to_string()),
        }
    }
}

/// Result type for remote client operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Account credentials for live mode.
///
/// Only held in memory; the secret never appears in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub subdomain: String,
    pub email: String,
    password: String,
    /// The secret is an API token rather than a password.
    pub token: bool,
}

impl Credentials {
    pub fn new(
        subdomain: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Credentials {
            subdomain: subdomain.into(),
            email: email.into(),
            password: password.into(),
            token: false,
        }
    }

    /// Treat the secret as an API token.
    pub fn with_token(mut self, token: bool) -> Self {
        self.token = token;
        self
    }

    fn basic_auth(&self) -> BasicAuth {
        let user = if self.token {
            format!("{}/token", self.email)
        } else {
            self.email.clone()
        };
        BasicAuth {
            user,
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subdomain", &self.subdomain)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("token", &self.token)
            .finish()
    }
}

/// The account behind an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

/// An authenticated session, valid for the life of the process.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    auth: BasicAuth,
    /// Who the API says we are.
    pub user: User,
}

impl Session {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, url: &str) -> HttpRequest {
        HttpRequest::new(url).with_auth(self.auth.clone())
    }
}

/// Returns the API root for an account.
pub fn base_url(subdomain: &str) -> String {
    format!("https://{subdomain}.zendesk.com")
}

/// Subdomains are DNS labels: ASCII letters, digits and inner hyphens.
fn is_valid_subdomain(subdomain: &str) -> bool {
    !subdomain.is_empty()
        && subdomain.len() <= 63
        && !subdomain.starts_with('-')
        && !subdomain.ends_with('-')
        && subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Scheme, host and port must match, and the URL may not carry its own
/// userinfo.
pub(super) fn is_same_origin(url: &str, base_url: &str) -> bool {
    match (reqwest::Url::parse(url), reqwest::Url::parse(base_url)) {
        (Ok(url), Ok(base)) => {
            url.origin() == base.origin()
                && url.username().is_empty()
                && url.password().is_none()
        }
        _ => false,
    }
}

#[derive(Deserialize)]
struct MeResponse {
    user: MeUser,
}

#[derive(Deserialize)]
struct MeUser {
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct TicketPage {
    tickets: Vec<Value>,
    #[serde(default)]
    next_page: Option<String>,
}

/// Client for the helpdesk API.
pub struct RemoteClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    options: ClientOptions,
}

impl RemoteClient<ReqwestTransport> {
    /// Create a client with the default HTTPS transport.
    pub fn new(options: ClientOptions, timeout: Duration) -> RemoteResult<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(options, transport))
    }
}

impl<T: HttpTransport> RemoteClient<T> {
    /// Create a client with a custom transport (for testing).
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        let options = ClientOptions {
            page_size: options.page_size.clamp(1, MAX_PAGE_SIZE),
            ..options
        };
        RemoteClient { transport, options }
    }

    /// Check that the account exists before sending credentials to it.
    ///
    /// The API answers 200 for known subdomains and redirects unknown ones.
    pub fn validate_subdomain(&self, subdomain: &str) -> RemoteResult<()> {
        if !is_valid_subdomain(subdomain) {
            return Err(RemoteError::UnknownSubdomain(subdomain.to_string()));
        }
        let url = format!("{}/access/unauthenticated", base_url(subdomain));
        let response = self.send(&HttpRequest::new(url))?;
        if response.status == 200 {
            tracing::info!(subdomain, "subdomain validated");
            Ok(())
        } else {
            tracing::warn!(subdomain, status = response.status, "subdomain rejected");
            Err(RemoteError::UnknownSubdomain(subdomain.to_string()))
        }
    }

    /// Authenticate and return a session for further requests.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::Auth`] when the credentials are rejected. Never retried.
    /// - [`RemoteError::Network`] / [`RemoteError::RateLimited`] once retries
    ///   are exhausted.
    pub fn authenticate(&self, credentials: &Credentials) -> RemoteResult<Session> {
        if !is_valid_subdomain(&credentials.subdomain) {
            return Err(RemoteError::UnknownSubdomain(credentials.subdomain.clone()));
        }
        let base_url = base_url(&credentials.subdomain);
        let auth = credentials.basic_auth();
        let url = format!("{base_url}/api/v2/users/me.json");

        let response = self.send(&HttpRequest::new(&url).with_auth(auth.clone()))?;
        let response = expect_success(&url, response)?;
        let me: MeResponse = parse_body(&url, &response)?;

        // Unauthenticated requests are answered with an anonymous user.
        let id = me.user.id.ok_or_else(|| RemoteError::Auth {
            status: response.status,
            message: "credentials were not accepted".to_string(),
        })?;
        let user = User {
            id,
            name: me.user.name.unwrap_or_default(),
            email: me.user.email,
        };
        tracing::info!(user = user.id, "authenticated");

        Ok(Session {
            base_url,
            auth,
            user,
        })
    }

    /// Fetch every ticket visible to the session, in server order.
    ///
    /// Pages are followed through `next_page` until the API reports no
    /// more. If any page fails, tickets from earlier pages are discarded and
    /// the error is returned.
    pub fn list_tickets(&self, session: &Session) -> RemoteResult<TicketBatch> {
        let mut batch = TicketBatch::new();
        let mut visited = HashSet::new();
        let mut next = Some(format!(
            "{}/api/v2/tickets.json?per_page={}",
            session.base_url, self.options.page_size
        ));

        while let Some(url) = next.take() {
            if !is_same_origin(&url, &session.base_url) {
                return Err(RemoteError::InvalidResponse {
                    url,
                    reason: "next page points outside the account".to_string(),
                });
            }
            if !visited.insert(url.clone()) {
                return Err(RemoteError::InvalidResponse {
                    url,
                    reason: "pagination returned to an earlier page".to_string(),
                });
            }

            let response = self.send(&session.request(&url))?;
            let response = expect_success(&url, response)?;
            let page: TicketPage = parse_body(&url, &response)?;

            let before = (batch.len(), batch.skipped);
            batch.extend_from_remote(&page.tickets, self.options.malformed)?;
            tracing::debug!(
                page = visited.len(),
                received = page.tickets.len(),
                accepted = batch.len() - before.0,
                skipped = batch.skipped - before.1,
                "fetched ticket page"
            );
            next = page.next_page;
        }

        tracing::info!(
            tickets = batch.len(),
            skipped = batch.skipped,
            pages = visited.len(),
            "fetched tickets"
        );
        Ok(batch)
    }

    /// Send a request, retrying transient failures per the retry policy.
    ///
    /// Returns any non-transient response as-is; status handling beyond
    /// 429 and 5xx is up to the caller.
    fn send(&self, request: &HttpRequest) -> RemoteResult<HttpResponse> {
        let mut attempt = 0;
        loop {
            let result = self
                .transport
                .get(request)
                .map_err(RemoteError::from)
                .and_then(check_transient);

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && self.options.retry.allows(attempt) => {
                    attempt += 1;
                    let delay = self.options.retry.delay_for(attempt, e.retry_after());
                    tracing::warn!(
                        url = %request.url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after: {}",
                        e
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

pub(super) fn check_transient(response: HttpResponse) -> RemoteResult<HttpResponse> {
    match response.status {
        429 => Err(RemoteError::RateLimited {
            retry_after: response.retry_after,
        }),
        500..=599 => Err(RemoteError::ServerError {
            status: response.status,
            retry_after: response.retry_after,
        }),
        _ => Ok(response),
    }
}

fn expect_success(url: &str, response: HttpResponse) -> RemoteResult<HttpResponse> {
    match response.status {
        200..=299 => Ok(response),
        401 | 403 => Err(RemoteError::Auth {
            status: response.status,
            message: error_message(&response.body),
        }),
        status => Err(RemoteError::UnexpectedStatus {
            status,
            url: url.to_string(),
        }),
    }
}

/// Pull a human-readable message out of an API error body.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.get("error")
                .and_then(Value::as_str)
                .or_else(|| v.pointer("/error/message").and_then(Value::as_str))
                .or_else(|| v.get("description").and_then(Value::as_str))
        })
        .map(String::from)
        .unwrap_or_else(|| "access denied".to_string())
}

fn parse_body<D: DeserializeOwned>(url: &str, response: &HttpResponse) -> RemoteResult<D> {
    serde_json::from_str(&response.body).map_err(|e| RemoteError::InvalidResponse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
