// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::remote::User;
use chrono::TimeZone;
use std::path::PathBuf;
use yare::parameterized;
use ztv_core::{Priority, Status, TicketType};

fn ticket(id: u64, subject: &str, status: Status) -> Ticket {
    let ts = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    Ticket {
        id,
        subject: subject.to_string(),
        description: "The printer is on fire.\n\nPlease advise.".to_string(),
        requester_id: 900,
        status,
        assignee_id: None,
        ticket_type: None,
        priority: None,
        tags: Vec::new(),
        created_at: ts,
        updated_at: ts,
    }
}

fn offline_set(tickets: Vec<Ticket>) -> TicketSet {
    TicketSet {
        tickets,
        skipped: 0,
        source: Source::Offline {
            path: PathBuf::from("tickets.pkl"),
            captured_at: Utc.with_ymd_and_hms(2024, 1, 11, 9, 5, 0).unwrap(),
        },
    }
}

#[parameterized(
    short = { "hello world", 20, &["hello world"] },
    exact = { "abcd efgh", 9, &["abcd efgh"] },
    wraps = { "one two three four", 9, &["one two", "three", "four"] },
    keeps_breaks = { "first\nsecond", 20, &["first", "second"] },
    blank_line = { "a\n\nb", 20, &["a", "", "b"] },
    long_word = { "abcdefghij xy", 4, &["abcd", "efgh", "ij", "xy"] },
    unicode = { "ünï çödé ñ", 4, &["ünï", "çödé", "ñ"] },
)]
fn wrap_text_cases(input: &str, width: usize, expected: &[&str]) {
    assert_eq!(wrap_text(input, width), expected.to_vec());
}

#[test]
fn wrap_text_lines_fit_width() {
    let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod".repeat(4);
    for line in wrap_text(&text, 17) {
        assert!(line.chars().count() <= 17, "line too long: {line:?}");
    }
}

#[parameterized(
    fits = { "short", 10, "short" },
    cut = { "a longer subject", 8, "a longe…" },
    zero = { "abc", 0, "" },
)]
fn truncate_cases(input: &str, width: usize, expected: &str) {
    assert_eq!(truncate(input, width), expected);
}

#[parameterized(
    plain = { "Printer on fire", "Printer on fire" },
    newline = { "line one\nline two", "line one line two" },
    carriage_return = { "a\r\nb", "a  b" },
    tab = { "col\tcol", "col col" },
    escape = { "\u{1b}[2Jgone", " [2Jgone" },
)]
fn single_line_cases(input: &str, expected: &str) {
    assert_eq!(single_line(input), expected);
}

#[test]
fn ticket_line_format() {
    let line = format_ticket_line(&ticket(42, "Printer on fire", Status::Open));
    assert_eq!(line, "#42 [open] Printer on fire");
}

#[test]
fn text_output_lists_tickets_then_summary() {
    let set = offline_set(vec![
        ticket(1, "First", Status::New),
        ticket(2, "Second", Status::Hold),
    ]);
    let mut out = Vec::new();
    write_text(&mut out, &set).unwrap();

    let text = String::from_utf8(out).unwrap();
    similar_asserts::assert_eq!(
        text.as_str(),
        "#1 [new] First\n\
         #2 [hold] Second\n\
         2 tickets (saved session tickets.pkl from 2024-01-11 09:05)\n"
    );
}

#[test]
fn text_output_empty() {
    let mut out = Vec::new();
    write_text(&mut out, &offline_set(Vec::new())).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("No tickets ("));
}

#[test]
fn json_output_is_remote_shape() {
    let set = offline_set(vec![ticket(7, "Seven", Status::Pending)]);
    let mut out = Vec::new();
    write_json(&mut out, &set).unwrap();

    let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["id"], 7);
    assert_eq!(parsed[0]["status"], "pending");
    assert_eq!(Ticket::from_remote(&parsed[0]).unwrap(), set.tickets[0]);
}

#[test]
fn live_source_names_user() {
    let source = Source::Live {
        fetched_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
        user: User {
            id: 7,
            name: "Agent Smith".into(),
            email: None,
        },
    };
    assert_eq!(format_source(&source), "live as Agent Smith at 2024-02-01 08:00");
}

#[parameterized(
    none = { 0, None },
    one = { 1, Some("warning: skipped 1 malformed ticket record (see the log for details)") },
    many = { 3, Some("warning: skipped 3 malformed ticket records (see the log for details)") },
)]
fn skipped_notice_cases(skipped: usize, expected: Option<&str>) {
    assert_eq!(skipped_notice(skipped).as_deref(), expected);
}

#[test]
fn details_include_fields_and_wrapped_description() {
    let mut t = ticket(5, "Broken", Status::Solved);
    t.ticket_type = Some(TicketType::Incident);
    t.priority = Some(Priority::Urgent);
    t.assignee_id = Some(12);
    t.tags = vec!["printer".into(), "fire".into()];

    let lines = format_ticket_details(&t, 80);
    assert_eq!(lines[0], "Ticket #5: Broken");
    assert!(lines.contains(&"Status: solved".to_string()));
    assert!(lines.contains(&"Type: incident".to_string()));
    assert!(lines.contains(&"Priority: urgent".to_string()));
    assert!(lines.contains(&"Assignee: 12".to_string()));
    assert!(lines.contains(&"Tags: printer, fire".to_string()));
    let desc = lines.iter().position(|l| l == "Description:").unwrap();
    assert_eq!(
        &lines[desc + 1..],
        &["    The printer is on fire.", "", "    Please advise."]
    );
}
