// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text formatting shared by the printer and the terminal viewer.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde_json::Value;
use ztv_core::Ticket;

use crate::error::Result;
use crate::repository::{Source, TicketSet};

/// Maximum line width for wrapped text content (excluding 4-space indent).
pub const WRAP_WIDTH: usize = 96;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Wrap text at word boundaries.
///
/// Existing line breaks are kept, and each line is wrapped on its own.
/// Words longer than `width` are split. Widths are counted in chars.
pub fn wrap_text(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut result = Vec::new();

    for line in content.lines() {
        if line.chars().count() <= width {
            result.push(line.trim_end().to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                result.push(word.into_iter().collect());
                word = rest;
            }

            if current.is_empty() {
                current = word.iter().collect();
                current_len = word.len();
            } else if current_len + 1 + word.len() <= width {
                current.push(' ');
                current.extend(word.iter());
                current_len += 1 + word.len();
            } else {
                result.push(std::mem::replace(&mut current, word.iter().collect()));
                current_len = word.len();
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
    }

    result
}

/// Replace control characters (newlines, tabs, escapes) with spaces so the
/// text occupies one screen row.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Truncate to `width` chars, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Format a single ticket line for list output
pub fn format_ticket_line(ticket: &Ticket) -> String {
    format!("#{} [{}] {}", ticket.id, ticket.status, ticket.subject)
}

/// Describe where the tickets came from.
pub fn format_source(source: &Source) -> String {
    match source {
        Source::Live { fetched_at, user } => format!(
            "live as {} at {}",
            if user.name.is_empty() {
                user.id.to_string()
            } else {
                user.name.clone()
            },
            format_timestamp(fetched_at)
        ),
        Source::Offline { path, captured_at } => format!(
            "saved session {} from {}",
            path.display(),
            format_timestamp(captured_at)
        ),
    }
}

/// One-line summary printed after the text listing.
pub fn format_summary(set: &TicketSet) -> String {
    let count = match set.tickets.len() {
        0 => "No tickets".to_string(),
        1 => "1 ticket".to_string(),
        n => format!("{n} tickets"),
    };
    format!("{count} ({})", format_source(&set.source))
}

/// Warning for records dropped during the fetch, if any.
pub fn skipped_notice(skipped: usize) -> Option<String> {
    match skipped {
        0 => None,
        1 => Some("warning: skipped 1 malformed ticket record (see the log for details)".into()),
        n => Some(format!(
            "warning: skipped {n} malformed ticket records (see the log for details)"
        )),
    }
}

/// Format ticket details for the detail view.
///
/// Output format:
/// ```text
/// Ticket #42: Printer on fire
/// Status: open
/// ...
///
/// Description:
///     Text goes here, wrapped to the
///     available width.
/// ```
pub fn format_ticket_details(ticket: &Ticket, width: usize) -> Vec<String> {
    let mut output = Vec::new();

    output.push(format!("Ticket #{}: {}", ticket.id, ticket.subject));
    output.push(format!("Status: {}", ticket.status));
    if let Some(ticket_type) = ticket.ticket_type {
        output.push(format!("Type: {ticket_type}"));
    }
    if let Some(priority) = ticket.priority {
        output.push(format!("Priority: {priority}"));
    }
    output.push(format!("Requester: {}", ticket.requester_id));
    if let Some(assignee) = ticket.assignee_id {
        output.push(format!("Assignee: {assignee}"));
    }
    output.push(format!("Created: {}", format_timestamp(&ticket.created_at)));
    output.push(format!("Updated: {}", format_timestamp(&ticket.updated_at)));
    if !ticket.tags.is_empty() {
        output.push(format!("Tags: {}", ticket.tags.join(", ")));
    }

    output.push(String::new());
    output.push("Description:".to_string());
    let wrap_width = width.saturating_sub(4).min(WRAP_WIDTH);
    for line in wrap_text(&ticket.description, wrap_width) {
        if line.is_empty() {
            output.push(String::new());
        } else {
            output.push(format!("    {line}"));
        }
    }

    output
}

/// Print the listing followed by a summary line.
pub fn write_text(out: &mut impl Write, set: &TicketSet) -> Result<()> {
    for ticket in &set.tickets {
        writeln!(out, "{}", format_ticket_line(ticket))?;
    }
    writeln!(out, "{}", format_summary(set))?;
    Ok(())
}

/// Print the tickets as a JSON array in the API's record shape.
pub fn write_json(out: &mut impl Write, set: &TicketSet) -> Result<()> {
    let records: Vec<Value> = set.tickets.iter().map(Ticket::to_remote_value).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
