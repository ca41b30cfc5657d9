// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core ticket types for the ztv ticket viewer.
//!
//! A [`Ticket`] is built either from a JSON object returned by the helpdesk
//! API ([`Ticket::from_remote`]) or from a stored session (serde). Remote
//! records are validated field by field; unknown fields are ignored.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

/// Workflow status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet looked at by an agent.
    New,
    /// Assigned and being worked on.
    Open,
    /// Waiting on the requester.
    Pending,
    /// Waiting on a third party.
    Hold,
    /// Resolved, may still be reopened.
    Solved,
    /// Archived, can no longer be reopened.
    Closed,
}

impl Status {
    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Open => "open",
            Status::Pending => "pending",
            Status::Hold => "hold",
            Status::Solved => "solved",
            Status::Closed => "closed",
        }
    }

    /// Returns true once the ticket has been solved or closed.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Status::Solved | Status::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "open" => Ok(Status::Open),
            "pending" => Ok(Status::Pending),
            "hold" | "on-hold" | "on_hold" => Ok(Status::Hold),
            "solved" => Ok(Status::Solved),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Classification of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Problem,
    Incident,
    Question,
    Task,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Problem => "problem",
            TicketType::Incident => "incident",
            TicketType::Question => "question",
            TicketType::Task => "task",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "problem" => Ok(TicketType::Problem),
            "incident" => Ok(TicketType::Incident),
            "question" => Ok(TicketType::Question),
            "task" => Ok(TicketType::Task),
            _ => Err(Error::malformed(None, format!("unknown ticket type '{s}'"))),
        }
    }
}

/// Urgency of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(Error::malformed(None, format!("unknown priority '{s}'"))),
        }
    }
}

/// A single support request.
///
/// Field names match the remote API so the stored form and the remote form
/// are the same JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier within a batch.
    pub id: u64,
    /// One-line summary.
    pub subject: String,
    /// Body of the first comment.
    pub description: String,
    /// User who opened the ticket.
    pub requester_id: u64,
    /// Current workflow state.
    pub status: Status,
    /// Agent the ticket is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// When the ticket was opened.
    pub created_at: DateTime<Utc>,
    /// When the ticket was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Builds a ticket from one record of an API response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] when a required field is missing or
    /// has the wrong type, a timestamp does not parse, or the status is not
    /// one of the known values.
    pub fn from_remote(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::malformed(None, "record is not a JSON object"))?;
        let id = obj
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::malformed(None, "missing or invalid field `id`"))?;

        let status_raw = required_str(obj, id, "status")?;
        let status = status_raw
            .parse::<Status>()
            .map_err(|_| Error::malformed(Some(id), format!("unrecognized status '{status_raw}'")))?;

        Ok(Ticket {
            id,
            subject: required_str(obj, id, "subject")?.to_string(),
            description: required_str(obj, id, "description")?.to_string(),
            requester_id: obj
                .get("requester_id")
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::malformed(Some(id), "missing or invalid field `requester_id`"))?,
            status,
            assignee_id: obj.get("assignee_id").and_then(Value::as_u64),
            ticket_type: optional_enum(obj, id, "type"),
            priority: optional_enum(obj, id, "priority"),
            tags: obj
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            created_at: required_timestamp(obj, id, "created_at")?,
            updated_at: required_timestamp(obj, id, "updated_at")?,
        })
    }

    /// Returns the ticket in the remote API's JSON shape.
    ///
    /// The result is accepted by [`Ticket::from_remote`] and yields an equal
    /// ticket.
    pub fn to_remote_value(&self) -> Value {
        json!({
            "id": self.id,
            "subject": self.subject,
            "description": self.description,
            "requester_id": self.requester_id,
            "status": self.status.as_str(),
            "assignee_id": self.assignee_id,
            "type": self.ticket_type.map(|t| t.as_str()),
            "priority": self.priority.map(|p| p.as_str()),
            "tags": self.tags,
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}

fn required_str<'a>(obj: &'a Map<String, Value>, id: u64, field: &str) -> Result<&'a str> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed(Some(id), format!("missing or invalid field `{field}`")))
}

fn required_timestamp(obj: &Map<String, Value>, id: u64, field: &str) -> Result<DateTime<Utc>> {
    let raw = required_str(obj, id, field)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::malformed(Some(id), format!("invalid timestamp in `{field}`: {e}")))
}

/// Display-only enums: unknown values are dropped rather than rejected.
fn optional_enum<T: FromStr>(obj: &Map<String, Value>, id: u64, field: &str) -> Option<T> {
    let raw = obj.get(field).and_then(Value::as_str)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::debug!(ticket = id, field, value = raw, "ignoring unknown value");
            None
        }
    }
}

/// What to do when a remote record fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log the record, count it and continue with the rest of the batch.
    #[default]
    Skip,
    /// Fail the whole batch on the first malformed record.
    Abort,
}

/// An ordered batch of tickets built from remote records.
#[derive(Debug, Clone, Default)]
pub struct TicketBatch {
    /// Valid tickets in input order.
    pub tickets: Vec<Ticket>,
    /// Number of records dropped under [`MalformedPolicy::Skip`].
    pub skipped: usize,
    seen: HashSet<u64>,
}

impl TicketBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch from remote records.
    pub fn from_remote<'a>(
        records: impl IntoIterator<Item = &'a Value>,
        policy: MalformedPolicy,
    ) -> Result<Self> {
        let mut batch = TicketBatch::new();
        batch.extend_from_remote(records, policy)?;
        Ok(batch)
    }

    /// Appends remote records, keeping identifiers unique across calls.
    ///
    /// A record repeating an identifier already in the batch counts as
    /// malformed.
    pub fn extend_from_remote<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a Value>,
        policy: MalformedPolicy,
    ) -> Result<()> {
        for record in records {
            let result = Ticket::from_remote(record).and_then(|ticket| {
                if self.seen.contains(&ticket.id) {
                    Err(Error::malformed(Some(ticket.id), "duplicate ticket id"))
                } else {
                    Ok(ticket)
                }
            });
            match result {
                Ok(ticket) => {
                    self.seen.insert(ticket.id);
                    self.tickets.push(ticket);
                }
                Err(e) if policy == MalformedPolicy::Skip => {
                    tracing::warn!("skipping record: {}", e);
                    self.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn into_tickets(self) -> Vec<Ticket> {
        self.tickets
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
