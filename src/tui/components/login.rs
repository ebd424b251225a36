//! # Login Component
//!
//! Sign-in form shown before the main tabs: username, email and password.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LoginFormState` lives in `TuiState`
//! - `LoginForm` is created each frame with borrowed state and the current
//!   validation error as a prop

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;

/// Events emitted by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    Submit {
        username: String,
        email: String,
        password: String,
    },
    Quit,
}

pub struct LoginFormState {
    fields: [TextField; 3],
    focus: usize,
    show_password: bool,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFormState {
    pub fn new() -> Self {
        let mut state = Self {
            fields: [
                TextField::new(" Username "),
                TextField::new(" Email "),
                TextField::masked(" Password "),
            ],
            focus: USERNAME,
            show_password: false,
        };
        state.sync_props();
        state
    }

    fn sync_props(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.focused = i == self.focus;
        }
        self.fields[PASSWORD].masked = !self.show_password;
    }

    fn submit(&self) -> LoginEvent {
        LoginEvent::Submit {
            username: self.fields[USERNAME].value().to_string(),
            email: self.fields[EMAIL].value().to_string(),
            password: self.fields[PASSWORD].value().to_string(),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }
}

impl EventHandler for LoginFormState {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LoginEvent> {
        let result = match event {
            TuiEvent::Escape => Some(LoginEvent::Quit),
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = (self.focus + 1) % self.fields.len();
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                None
            }
            TuiEvent::TogglePassword => {
                self.show_password = !self.show_password;
                None
            }
            _ => match self.fields[self.focus].handle_event(event) {
                // Enter moves down the form; on the last field it signs in
                Some(FieldEvent::Submit) if self.focus == PASSWORD => Some(self.submit()),
                Some(FieldEvent::Submit) => {
                    self.focus += 1;
                    None
                }
                _ => None,
            },
        };
        self.sync_props();
        result
    }
}

/// Transient render wrapper for the login form.
pub struct LoginForm<'a> {
    state: &'a mut LoginFormState,
    error: Option<&'a str>,
}

impl<'a> LoginForm<'a> {
    pub fn new(state: &'a mut LoginFormState, error: Option<&'a str>) -> Self {
        Self { state, error }
    }
}

impl Component for LoginForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Max(48)])
            .flex(Flex::Center)
            .areas(area);
        let [brand, username, email, password, button, error] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .flex(Flex::Center)
        .areas(column);

        let brand_text = vec![
            Line::from("💎"),
            Line::from(Span::styled(
                "MoneyWise",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your path to financial freedom",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(brand_text).alignment(Alignment::Center),
            brand,
        );

        for (field, field_area) in self.state.fields.iter_mut().zip([username, email, password]) {
            field.render(frame, field_area);
        }

        let hint = if self.state.show_password {
            "Ctrl+S hide password"
        } else {
            "Ctrl+S show password"
        };
        let button_text = vec![
            Line::from(Span::styled(
                " Sign In ✨ ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(
            Paragraph::new(button_text).alignment(Alignment::Center),
            button,
        );

        if let Some(message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                    .alignment(Alignment::Center),
                error,
            );
        }
    }
}
