//! # TextField Component
//!
//! Single-line text input used by the login form, budget entry form and
//! settings prompt.
//!
//! ## State Management
//!
//! The value and cursor are internal state. `focused` and `masked` are props
//! set by the owning form. The cursor is a byte offset that always sits on a
//! char boundary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MASK_CHAR: char = '•';

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
    Submit,
}

pub struct TextField {
    pub label: String,
    /// Render the value as bullets (Prop)
    pub masked: bool,
    /// Draw the focus border and terminal cursor (Prop)
    pub focused: bool,
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            masked: false,
            focused: false,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn masked(label: impl Into<String>) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.len();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text as it appears on screen.
    fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Display column of the cursor, counted in terminal cells.
    fn cursor_column(&self) -> usize {
        let before = &self.value[..self.cursor];
        if self.masked {
            before.chars().count()
        } else {
            before.width()
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.value, self.cursor);
                self.value.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.value.len()).then(|| {
                let next = next_char_boundary(&self.value, self.cursor);
                self.value.drain(self.cursor..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.value, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.value, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.value.len();
                None
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(self.label.as_str());

        // Scroll horizontally so the cursor stays inside the box
        let inner_width = area.width.saturating_sub(2) as usize;
        let column = self.cursor_column();
        let offset = (column + 1).saturating_sub(inner_width);

        let paragraph = Paragraph::new(self.display_text())
            .block(block)
            .scroll((0, offset as u16));
        frame.render_widget(paragraph, area);

        if self.focused && area.width > 2 && area.height > 2 {
            let x = area.x + 1 + (column - offset) as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}
