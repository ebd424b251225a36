//! # TabBar Component
//!
//! Top status bar: brand, tab strip and the latest status message.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TabBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut bar = TabBar::new(Some(Tab::Lessons), "Signed in as alice");
//! bar.render(frame, area);
//! ```
//!
//! ### Conditional Formatting
//!
//! 1. **Logged out** (`active_tab = None`): brand only, plus status
//! 2. **Logged in**: brand, every tab with the active one highlighted, status
//!
//! The status message is dropped entirely when empty so no dangling
//! separator is drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Tab;
use crate::tui::component::Component;

pub struct TabBar {
    /// Highlighted tab; `None` on the login screen
    pub active_tab: Option<Tab>,
    pub status_message: String,
}

impl TabBar {
    pub fn new(active_tab: Option<Tab>, status_message: impl Into<String>) -> Self {
        Self {
            active_tab,
            status_message: status_message.into(),
        }
    }

    fn line(&self) -> Line<'static> {
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            " MoneyWise",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )];

        if let Some(active) = self.active_tab {
            spans.push(separator.clone());
            for (i, tab) in Tab::ALL.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                let style = if *tab == active {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                spans.push(Span::styled(format!(" {} ", tab.label()), style));
            }
        }

        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Green),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
