// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ztv-core: Shared library for the ztv ticket viewer
//!
//! This crate provides the ticket data model and the session store used to
//! save fetched tickets for offline viewing. It does no network I/O.

pub mod error;
pub mod store;
pub mod ticket;

pub use error::{Error, Result};
pub use store::StoredSession;
pub use ticket::{MalformedPolicy, Priority, Status, Ticket, TicketBatch, TicketType};
