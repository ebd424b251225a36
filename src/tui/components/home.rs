//! # Home Component
//!
//! Dashboard tab: time-of-day greeting, welcome card, tip of the day and the
//! quick-action shortcuts into the other tabs.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HomeScreenState` lives in `TuiState` and remembers the highlighted action
//! - `HomeScreen` is created each frame with the greeting and user name as props

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::home::{Greeting, QUICK_ACTIONS, TIP_OF_THE_DAY, WELCOME_TEXT};
use crate::core::state::Tab;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::step_selection;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvent {
    Open(Tab),
}

pub struct HomeScreenState {
    pub selected: usize,
    list_state: ListState,
}

impl Default for HomeScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreenState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }
}

impl EventHandler for HomeScreenState {
    type Event = HomeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HomeEvent> {
        match event {
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let down = matches!(event, TuiEvent::CursorDown);
                self.selected = step_selection(self.selected, QUICK_ACTIONS.len(), down);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => QUICK_ACTIONS
                .get(self.selected)
                .map(|action| HomeEvent::Open(action.target)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the home tab.
pub struct HomeScreen<'a> {
    state: &'a mut HomeScreenState,
    greeting: Greeting,
    user_name: &'a str,
    show_welcome: bool,
}

impl<'a> HomeScreen<'a> {
    pub fn new(
        state: &'a mut HomeScreenState,
        greeting: Greeting,
        user_name: &'a str,
        show_welcome: bool,
    ) -> Self {
        Self {
            state,
            greeting,
            user_name,
            show_welcome,
        }
    }
}

impl Component for HomeScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let welcome_height = if self.show_welcome { 5 } else { 0 };
        let [header, welcome, tip, actions] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(welcome_height),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .areas(area);

        let header_text = vec![
            Line::from(Span::styled(
                format!("{} 👋", self.greeting.label()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                self.user_name.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(header_text).block(Block::new().padding(Padding::horizontal(1))),
            header,
        );

        if self.show_welcome {
            let card = Paragraph::new(WELCOME_TEXT)
                .wrap(Wrap { trim: true })
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(" Welcome to MoneyWise! 🎉 "),
                );
            frame.render_widget(card, welcome);
        }

        let tip_card = Paragraph::new(TIP_OF_THE_DAY).wrap(Wrap { trim: true }).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green))
                .title(" 💡 Tip of the Day "),
        );
        frame.render_widget(tip_card, tip);

        let items: Vec<ListItem> = QUICK_ACTIONS
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} {:<16}", action.icon, action.name), style),
                    Span::styled(
                        format!(" {}", action.category),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Quick Actions ")
                .title_bottom(Line::from(" ↑↓ Move  Enter Open ").centered()),
        );
        frame.render_stateful_widget(list, actions, &mut self.state.list_state);
    }
}
