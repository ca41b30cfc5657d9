// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::transport_tests::MockTransport;
use super::*;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use yare::parameterized;
use ztv_core::MalformedPolicy;

const BASE: &str = "https://acme.zendesk.com";

fn fast_options() -> ClientOptions {
    ClientOptions {
        page_size: 2,
        retry: RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        },
        malformed: MalformedPolicy::Skip,
    }
}

fn credentials() -> Credentials {
    Credentials::new("acme", "agent@example.com", "hunter2")
}

fn remote_ticket(id: u64) -> Value {
    json!({
        "id": id,
        "subject": format!("Ticket {id}"),
        "description": "Something is broken",
        "requester_id": 42,
        "assignee_id": null,
        "status": "open",
        "type": null,
        "priority": "normal",
        "tags": [],
        "created_at": "2018-03-01T10:00:00Z",
        "updated_at": "2018-03-02T11:30:00Z"
    })
}

fn page(ids: &[u64], next: Option<&str>) -> HttpResponse {
    let tickets: Vec<Value> = ids.iter().map(|id| remote_ticket(*id)).collect();
    HttpResponse::new(
        200,
        json!({ "tickets": tickets, "next_page": next, "count": ids.len() }).to_string(),
    )
}

fn me_ok() -> HttpResponse {
    HttpResponse::new(
        200,
        json!({"user": {"id": 7, "name": "Agent Smith", "email": "agent@example.com"}})
            .to_string(),
    )
}

fn client(transport: &MockTransport) -> RemoteClient<MockTransport> {
    RemoteClient::with_transport(fast_options(), transport.clone())
}

fn session(transport: &MockTransport) -> Session {
    transport.respond("/users/me.json", me_ok());
    client(transport).authenticate(&credentials()).unwrap()
}

#[test]
fn validate_subdomain_accepts_200() {
    let transport = MockTransport::new();
    transport.respond("/access/unauthenticated", HttpResponse::new(200, ""));

    client(&transport).validate_subdomain("acme").unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, format!("{BASE}/access/unauthenticated"));
    assert!(requests[0].auth.is_none());
}

#[test]
fn validate_subdomain_rejects_redirect() {
    let transport = MockTransport::new();
    transport.respond("/access/unauthenticated", HttpResponse::new(302, ""));

    let err = client(&transport).validate_subdomain("nosuch").unwrap_err();
    assert!(matches!(err, RemoteError::UnknownSubdomain(ref s) if s == "nosuch"));
}

#[test]
fn validate_subdomain_rejects_bad_names_without_request() {
    let transport = MockTransport::new();
    for name in ["", "has space", "evil.com/x", "-lead", "trail-"] {
        let err = client(&transport).validate_subdomain(name).unwrap_err();
        assert!(matches!(err, RemoteError::UnknownSubdomain(_)));
    }
    assert!(transport.requests().is_empty());
}

#[test]
fn authenticate_returns_session_with_user() {
    let transport = MockTransport::new();
    let session = session(&transport);

    assert_eq!(session.user.id, 7);
    assert_eq!(session.user.name, "Agent Smith");
    assert_eq!(session.base_url(), BASE);
    let auth = transport.requests()[0].auth.clone().unwrap();
    assert_eq!(auth.user, "agent@example.com");
    assert_eq!(auth.password, "hunter2");
}

#[test]
fn authenticate_with_token_uses_token_user() {
    let transport = MockTransport::new();
    transport.respond("/users/me.json", me_ok());

    client(&transport)
        .authenticate(&credentials().with_token(true))
        .unwrap();

    let auth = transport.requests()[0].auth.clone().unwrap();
    assert_eq!(auth.user, "agent@example.com/token");
}

#[test]
fn authenticate_rejected_is_auth_error_and_not_retried() {
    let transport = MockTransport::new();
    transport.respond(
        "/users/me.json",
        HttpResponse::new(401, r#"{"error":"Couldn't authenticate you"}"#),
    );

    let err = client(&transport).authenticate(&credentials()).unwrap_err();
    match err {
        RemoteError::Auth { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Couldn't authenticate you");
        }
        other => unreachable!("expected auth error, got {other:?}"),
    }
    assert_eq!(transport.count("/users/me.json"), 1);
    assert_eq!(transport.count("/tickets.json"), 0);
}

#[test]
fn authenticate_anonymous_user_is_auth_error() {
    let transport = MockTransport::new();
    transport.respond(
        "/users/me.json",
        HttpResponse::new(200, r#"{"user":{"id":null,"name":"Anonymous user"}}"#),
    );

    let err = client(&transport).authenticate(&credentials()).unwrap_err();
    assert!(matches!(err, RemoteError::Auth { .. }));
}

#[test]
fn authenticate_garbage_body_is_invalid_response() {
    let transport = MockTransport::new();
    transport.respond("/users/me.json", HttpResponse::new(200, "<html>"));

    let err = client(&transport).authenticate(&credentials()).unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse { .. }));
}

#[test]
fn list_tickets_follows_pages_in_order() {
    let transport = MockTransport::new();
    let session = session(&transport);
    let page2 = format!("{BASE}/api/v2/tickets.json?page=2&per_page=2");
    let page3 = format!("{BASE}/api/v2/tickets.json?page=3&per_page=2");
    transport
        .respond("per_page=2", page(&[1, 2], Some(&page2)))
        .respond("page=2", page(&[3, 4], Some(&page3)))
        .respond("page=3", page(&[5], None));

    let batch = client(&transport).list_tickets(&session).unwrap();

    let ids: Vec<u64> = batch.tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(batch.skipped, 0);
    let first = &transport.requests()[1];
    assert_eq!(first.url, format!("{BASE}/api/v2/tickets.json?per_page=2"));
    assert!(first.auth.is_some());
}

#[test]
fn list_tickets_empty_account() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport.respond("/tickets.json", page(&[], None));

    let batch = client(&transport).list_tickets(&session).unwrap();
    assert!(batch.is_empty());
}

#[test]
fn list_tickets_fails_whole_fetch_when_later_page_fails() {
    let transport = MockTransport::new();
    let session = session(&transport);
    let page2 = format!("{BASE}/api/v2/tickets.json?cursor=abc");
    transport.respond("per_page=2", page(&[1, 2], Some(&page2)));
    for _ in 0..3 {
        transport.fail("cursor=abc", TransportError::Timeout("timed out".into()));
    }

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::Network(_)));
    // one attempt plus two retries
    assert_eq!(transport.count("cursor=abc"), 3);
}

#[test]
fn list_tickets_retries_rate_limit_then_succeeds() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport
        .respond(
            "/tickets.json",
            HttpResponse::new(429, "").with_retry_after(Duration::from_secs(60)),
        )
        .respond("/tickets.json", page(&[1], None));

    let batch = client(&transport).list_tickets(&session).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(transport.count("/tickets.json"), 2);
}

#[test]
fn list_tickets_rate_limit_exhausted() {
    let transport = MockTransport::new();
    let session = session(&transport);
    for _ in 0..3 {
        transport.respond(
            "/tickets.json",
            HttpResponse::new(429, "").with_retry_after(Duration::from_secs(2)),
        );
    }

    let err = client(&transport).list_tickets(&session).unwrap_err();
    match err {
        RemoteError::RateLimited { retry_after } => {
            assert_eq!(retry_after, Some(Duration::from_secs(2)));
        }
        other => unreachable!("expected rate limit, got {other:?}"),
    }
}

#[test]
fn list_tickets_retries_server_errors() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport
        .respond("/tickets.json", HttpResponse::new(503, "busy"))
        .respond("/tickets.json", page(&[1, 2], None));

    let batch = client(&transport).list_tickets(&session).unwrap();
    assert_eq!(batch.len(), 2);
}

#[test]
fn server_error_keeps_retry_after() {
    let response = HttpResponse::new(503, "").with_retry_after(Duration::from_secs(2));
    let err = check_transient(response).unwrap_err();
    assert!(matches!(err, RemoteError::ServerError { status: 503, .. }));
    assert!(err.is_transient());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
}

#[test]
fn list_tickets_waits_for_server_retry_after() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport
        .respond(
            "/tickets.json",
            HttpResponse::new(503, "").with_retry_after(Duration::from_millis(80)),
        )
        .respond("/tickets.json", page(&[1], None));
    let options = ClientOptions {
        retry: RetryPolicy {
            max_retries: 1,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_secs(10),
        },
        ..fast_options()
    };

    let started = Instant::now();
    let batch = RemoteClient::with_transport(options, transport.clone())
        .list_tickets(&session)
        .unwrap();

    assert_eq!(batch.len(), 1);
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[test]
fn list_tickets_server_errors_exhausted() {
    let transport = MockTransport::new();
    let session = session(&transport);
    for _ in 0..3 {
        transport.respond("/tickets.json", HttpResponse::new(502, "bad gateway"));
    }

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::ServerError { status: 502, .. }));
    assert_eq!(transport.count("/tickets.json"), 3);
}

#[test]
fn list_tickets_skips_malformed_records() {
    let transport = MockTransport::new();
    let session = session(&transport);
    let mut bad = remote_ticket(3);
    bad["status"] = json!("archived");
    let body = json!({
        "tickets": [remote_ticket(1), remote_ticket(2), bad, remote_ticket(4), remote_ticket(5)],
        "next_page": null
    });
    transport.respond("/tickets.json", HttpResponse::new(200, body.to_string()));

    let batch = client(&transport).list_tickets(&session).unwrap();
    let ids: Vec<u64> = batch.tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
    assert_eq!(batch.skipped, 1);
}

#[test]
fn list_tickets_strict_aborts_on_malformed_record() {
    let transport = MockTransport::new();
    let session = session(&transport);
    let mut bad = remote_ticket(2);
    bad.as_object_mut().unwrap().remove("subject");
    let body = json!({ "tickets": [remote_ticket(1), bad], "next_page": null });
    transport.respond("/tickets.json", HttpResponse::new(200, body.to_string()));

    let options = ClientOptions {
        malformed: MalformedPolicy::Abort,
        ..fast_options()
    };
    let err = RemoteClient::with_transport(options, transport.clone())
        .list_tickets(&session)
        .unwrap_err();
    assert!(matches!(err, RemoteError::Record(_)));
}

#[test]
fn list_tickets_refuses_foreign_next_page() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport.respond(
        "/tickets.json",
        page(&[1], Some("https://elsewhere.example.com/steal")),
    );

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse { .. }));
    assert_eq!(transport.count("elsewhere"), 0);
}

#[parameterized(
    suffixed_host = { "https://acme.zendesk.com.evil.example/steal" },
    userinfo = { "https://acme.zendesk.com@evil.example/steal" },
    plain_http = { "http://acme.zendesk.com/api/v2/tickets.json?page=2" },
    other_port = { "https://acme.zendesk.com:8443/api/v2/tickets.json?page=2" },
    not_a_url = { "/api/v2/tickets.json?page=2" },
)]
fn list_tickets_refuses_lookalike_next_page(next: &str) {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport.respond("/tickets.json", page(&[1], Some(next)));

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse { .. }));
    // only the login and the first page went out
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn same_origin_accepts_account_urls() {
    assert!(is_same_origin(
        "https://acme.zendesk.com/api/v2/tickets.json?page=2",
        BASE
    ));
    assert!(is_same_origin("https://ACME.zendesk.com:443/x", BASE));
    assert!(!is_same_origin("https://acme.zendesk.com.evil.example/x", BASE));
}

#[test]
fn list_tickets_detects_pagination_loop() {
    let transport = MockTransport::new();
    let session = session(&transport);
    let first = format!("{BASE}/api/v2/tickets.json?per_page=2");
    transport.respond("per_page=2", page(&[1], Some(&first)));

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse { .. }));
}

#[test]
fn unexpected_status_is_reported() {
    let transport = MockTransport::new();
    let session = session(&transport);
    transport.respond("/tickets.json", HttpResponse::new(404, "{}"));

    let err = client(&transport).list_tickets(&session).unwrap_err();
    assert!(matches!(err, RemoteError::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn page_size_is_clamped() {
    let transport = MockTransport::new();
    let options = ClientOptions {
        page_size: 500,
        ..fast_options()
    };
    let session = session(&transport);
    transport.respond("/tickets.json", page(&[], None));

    RemoteClient::with_transport(options, transport.clone())
        .list_tickets(&session)
        .unwrap();

    let last = transport.requests().pop().unwrap();
    assert_eq!(
        last.url,
        format!("{BASE}/api/v2/tickets.json?per_page={MAX_PAGE_SIZE}")
    );
}

#[test]
fn credentials_debug_redacts_password() {
    let debug = format!("{:?}", credentials());
    assert!(debug.contains("agent@example.com"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn transient_classification() {
    assert!(RemoteError::Network("x".into()).is_transient());
    assert!(RemoteError::ServerError {
        status: 500,
        retry_after: None
    }
    .is_transient());
    assert!(RemoteError::RateLimited { retry_after: None }.is_transient());
    assert!(!RemoteError::Auth {
        status: 401,
        message: String::new()
    }
    .is_transient());
    assert!(!RemoteError::UnknownSubdomain("x".into()).is_transient());
}
