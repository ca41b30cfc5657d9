// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive list/detail viewer.
//!
//! Navigation ([`state`]) and layout ([`render`]) are pure; this module only
//! owns the terminal.

mod render;
mod state;

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute, Stylize};
use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand};

use crate::error::{Error, Result};
use crate::repository::TicketSet;

pub use render::{Layout, Line, LineStyle};
pub use state::{Key, ViewState};

/// Puts the terminal in raw mode on the alternate screen, and restores it
/// when dropped, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut io::Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the viewer until the user quits.
pub fn run(set: &TicketSet, no_color: bool) -> Result<()> {
    run_loop(set, no_color).map_err(|e| Error::Terminal(e.to_string()))
}

fn run_loop(set: &TicketSet, no_color: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    let mut state = ViewState::new(set.tickets.len());
    tracing::debug!(tickets = set.tickets.len(), "viewer started");

    loop {
        let (width, height) = terminal::size()?;
        let layout = Layout::new(width, height);
        state.scroll_into_view(layout.body_rows());
        draw(&mut stdout, &render::render(set, &state, layout), no_color)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let detail_len = render::detail_lines(set, &state, layout).len();
                state.handle(Key::from_event(&key), layout.body_rows(), detail_len);
                if state.should_quit() {
                    break;
                }
            }
            // Redrawn at the new size on the next pass
            Event::Resize(..) => {}
            _ => {}
        }
    }

    tracing::debug!("viewer closed");
    Ok(())
}

fn draw(stdout: &mut io::Stdout, lines: &[Line], no_color: bool) -> io::Result<()> {
    stdout.queue(terminal::Clear(terminal::ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        stdout.queue(cursor::MoveTo(0, row))?;
        let text = line.text.as_str();
        match (line.style, no_color) {
            (LineStyle::Selected, _) => {
                stdout.queue(SetAttribute(Attribute::Reverse))?;
                stdout.queue(Print(text))?;
                stdout.queue(SetAttribute(Attribute::Reset))?;
            }
            (LineStyle::Title, false) => {
                stdout.queue(Print(text.bold().cyan()))?;
            }
            (LineStyle::Title, true) | (LineStyle::Heading, _) => {
                stdout.queue(Print(text.bold()))?;
            }
            (LineStyle::Keys | LineStyle::Footer | LineStyle::Resolved, false) => {
                stdout.queue(Print(text.dark_grey()))?;
            }
            _ => {
                stdout.queue(Print(text))?;
            }
        }
    }
    stdout.flush()
}
