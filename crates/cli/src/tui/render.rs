// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Screen layout for the viewer, computed without a terminal.

use crate::display::{
    format_source, format_ticket_details, format_timestamp, single_line, truncate,
};
use crate::repository::TicketSet;

use super::state::{View, ViewState};

/// Title, key help and column headings.
pub const HEADER_ROWS: u16 = 3;
/// Status line.
pub const FOOTER_ROWS: u16 = 1;

const TITLE: &str = "ztv - helpdesk ticket viewer";
const LIST_KEYS: &str = "↑/↓ PgUp/PgDn Home/End: Navigate  Enter: Open  q: Quit";
const DETAIL_KEYS: &str = "↑/↓ PgUp/PgDn: Scroll  Esc: Back  q: Quit";

const ID_WIDTH: usize = 9;
const STATUS_WIDTH: usize = 8;
const TYPE_WIDTH: usize = 9;
const PRIORITY_WIDTH: usize = 9;
const UPDATED_WIDTH: usize = 16;
const MIN_SUBJECT_WIDTH: usize = 10;

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Layout { width, height }
    }

    /// Rows available between header and footer, at least one.
    pub fn body_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS)).max(1)
    }

    fn width(&self) -> usize {
        usize::from(self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Keys,
    Heading,
    Normal,
    /// Solved or closed ticket in the list.
    Resolved,
    Selected,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: LineStyle, width: usize) -> Self {
        Line {
            text: truncate(&single_line(&text.into()), width),
            style,
        }
    }
}

/// Lines of the detail view for the selected ticket.
pub fn detail_lines(set: &TicketSet, state: &ViewState, layout: Layout) -> Vec<String> {
    state
        .selected()
        .and_then(|i| set.tickets.get(i))
        .map(|t| format_ticket_details(t, layout.width()))
        .unwrap_or_default()
}

/// Render the whole screen, top to bottom.
pub fn render(set: &TicketSet, state: &ViewState, layout: Layout) -> Vec<Line> {
    let width = layout.width();
    let rows = layout.body_rows();
    let mut lines = Vec::with_capacity(usize::from(layout.height));

    match state.view() {
        View::List => {
            lines.push(Line::new(format!("{TITLE} | Tickets"), LineStyle::Title, width));
            lines.push(Line::new(LIST_KEYS, LineStyle::Keys, width));
            lines.push(Line::new(
                list_row(width, "Ticket #", "Subject", "Status", "Type", "Priority", "Updated"),
                LineStyle::Heading,
                width,
            ));

            if set.tickets.is_empty() {
                lines.push(Line::new("No tickets", LineStyle::Normal, width));
            }
            let start = state.offset();
            for (i, ticket) in set.tickets.iter().enumerate().skip(start).take(rows) {
                let style = if Some(i) == state.selected() {
                    LineStyle::Selected
                } else if ticket.status.is_resolved() {
                    LineStyle::Resolved
                } else {
                    LineStyle::Normal
                };
                let row = list_row(
                    width,
                    &format!("#{}", ticket.id),
                    &ticket.subject,
                    ticket.status.as_str(),
                    ticket.ticket_type.map(|t| t.as_str()).unwrap_or("-"),
                    ticket.priority.map(|p| p.as_str()).unwrap_or("-"),
                    &format_timestamp(&ticket.updated_at),
                );
                lines.push(Line::new(row, style, width));
            }
        }
        View::Detail { scroll } => {
            let selected = state.selected().unwrap_or(0);
            let page_title = set
                .tickets
                .get(selected)
                .map(|t| format!("Ticket #{}", t.id))
                .unwrap_or_default();
            lines.push(Line::new(
                format!("{TITLE} | {page_title}"),
                LineStyle::Title,
                width,
            ));
            lines.push(Line::new(DETAIL_KEYS, LineStyle::Keys, width));
            lines.push(Line::new("", LineStyle::Normal, width));
            for text in detail_lines(set, state, layout).into_iter().skip(scroll).take(rows) {
                lines.push(Line::new(text, LineStyle::Normal, width));
            }
        }
    }

    let body_end = usize::from(HEADER_ROWS) + rows;
    while lines.len() < body_end {
        lines.push(Line::new("", LineStyle::Normal, width));
    }
    lines.push(Line::new(footer(set, state, rows), LineStyle::Footer, width));
    lines
}

/// Status line: position, provenance and skipped count.
pub fn footer(set: &TicketSet, state: &ViewState, rows: usize) -> String {
    let total = set.tickets.len();
    let position = match (state.view(), state.selected()) {
        (_, None) => "No tickets".to_string(),
        (View::List, Some(_)) => {
            let first = state.offset() + 1;
            let last = (state.offset() + rows).min(total);
            format!("Tickets {first}-{last} of {total}")
        }
        (View::Detail { .. }, Some(i)) => format!("Ticket {} of {total}", i + 1),
    };
    let mut parts = vec![position, format_source(&set.source)];
    if set.skipped > 0 {
        parts.push(format!("{} skipped", set.skipped));
    }
    parts.join(" | ")
}

fn list_row(
    width: usize,
    id: &str,
    subject: &str,
    status: &str,
    ticket_type: &str,
    priority: &str,
    updated: &str,
) -> String {
    let fixed = ID_WIDTH + STATUS_WIDTH + TYPE_WIDTH + PRIORITY_WIDTH + UPDATED_WIDTH + 5;
    let subject_width = width.saturating_sub(fixed).max(MIN_SUBJECT_WIDTH);
    format!(
        "{:<ID_WIDTH$} {:<subject_width$} {:<STATUS_WIDTH$} {:<TYPE_WIDTH$} {:<PRIORITY_WIDTH$} {}",
        truncate(id, ID_WIDTH),
        truncate(&single_line(subject), subject_width),
        status,
        ticket_type,
        priority,
        updated,
    )
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
