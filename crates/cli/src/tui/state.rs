// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation state for the viewer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Viewer input, decoupled from the terminal's key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Open,
    Back,
    Quit,
    Other,
}

impl Key {
    pub fn from_event(event: &KeyEvent) -> Key {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
            KeyCode::Char('q') | KeyCode::F(8) => Key::Quit,
            KeyCode::Up | KeyCode::Char('k') => Key::Up,
            KeyCode::Down | KeyCode::Char('j') => Key::Down,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Enter | KeyCode::Char(' ') => Key::Open,
            KeyCode::Esc | KeyCode::Backspace => Key::Back,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    /// Detail of the selected ticket, scrolled by `scroll` lines.
    Detail { scroll: usize },
}

/// Selection, scroll offset and current view.
///
/// `selected` is always a valid index when there are tickets, and
/// `offset <= selected < offset + rows` holds after every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    len: usize,
    selected: usize,
    offset: usize,
    view: View,
    quit: bool,
}

impl ViewState {
    pub fn new(len: usize) -> Self {
        ViewState {
            len,
            selected: 0,
            offset: 0,
            view: View::List,
            quit: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.selected)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one key.
    ///
    /// `rows` is the number of body rows on screen; `detail_len` the number
    /// of lines in the detail view of the selected ticket.
    pub fn handle(&mut self, key: Key, rows: usize, detail_len: usize) {
        let rows = rows.max(1);
        if key == Key::Quit {
            self.quit = true;
            return;
        }
        match self.view {
            View::List => self.handle_list(key, rows),
            View::Detail { scroll } => self.handle_detail(key, scroll, rows, detail_len),
        }
    }

    fn handle_list(&mut self, key: Key, rows: usize) {
        if self.is_empty() {
            return;
        }
        let last = self.len - 1;
        self.selected = match key {
            Key::Up => self.selected.saturating_sub(1),
            Key::Down => (self.selected + 1).min(last),
            Key::PageUp => self.selected.saturating_sub(rows),
            Key::PageDown => (self.selected + rows).min(last),
            Key::Home => 0,
            Key::End => last,
            Key::Open => {
                self.view = View::Detail { scroll: 0 };
                self.selected
            }
            _ => self.selected,
        };
        self.scroll_into_view(rows);
    }

    fn handle_detail(&mut self, key: Key, scroll: usize, rows: usize, detail_len: usize) {
        let max_scroll = detail_len.saturating_sub(rows);
        let scroll = match key {
            Key::Back => {
                self.view = View::List;
                return;
            }
            Key::Up => scroll.saturating_sub(1),
            Key::Down => scroll + 1,
            Key::PageUp => scroll.saturating_sub(rows),
            Key::PageDown => scroll + rows,
            Key::Home => 0,
            Key::End => max_scroll,
            _ => scroll,
        };
        self.view = View::Detail {
            scroll: scroll.min(max_scroll),
        };
    }

    /// Adjust the scroll offset so the selection is visible in `rows` rows.
    ///
    /// Also called after a resize.
    pub fn scroll_into_view(&mut self, rows: usize) {
        let rows = rows.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
        let max_offset = self.len.saturating_sub(rows);
        self.offset = self.offset.min(max_offset);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
