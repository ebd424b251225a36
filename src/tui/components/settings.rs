//! # Settings Component
//!
//! Overlay listing the account fields with a logout row. Opened with `s`
//! from any tab, closed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SettingsScreenState` lives in `TuiState`
//! - `SettingsScreen` is created each frame with the session as a prop
//!
//! Enter on a field opens a prompt pre-filled with the current value
//! (empty for the password). The prompt stays open until the app loop
//! calls [`SettingsScreenState::close_prompt`] after a successful update.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::account::{AccountField, UserSession};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::components::{centered_rect, step_selection};
use crate::tui::event::TuiEvent;

const LOGOUT_ROW: usize = AccountField::ALL.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Enter on a field row; the caller opens the prompt with the session
    Edit(AccountField),
    Update { field: AccountField, value: String },
    Logout,
    Close,
}

struct Prompt {
    field: AccountField,
    input: TextField,
}

pub struct SettingsScreenState {
    pub selected: usize,
    prompt: Option<Prompt>,
    list_state: ListState,
}

impl Default for SettingsScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreenState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            prompt: None,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    /// Open the edit prompt for `field`, pre-filled from the session.
    pub fn open_prompt(&mut self, field: AccountField, session: Option<&UserSession>) {
        let label = format!(" New {} ", field.label().to_lowercase());
        let mut input = match (field, session) {
            (AccountField::Password, _) => TextField::masked(label),
            (_, Some(session)) => TextField::new(label).with_value(session.display_value(field)),
            (_, None) => TextField::new(label),
        };
        input.focused = true;
        self.prompt = Some(Prompt { field, input });
    }
}

impl EventHandler for SettingsScreenState {
    type Event = SettingsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SettingsEvent> {
        if let Some(prompt) = self.prompt.as_mut() {
            return match event {
                TuiEvent::Escape => {
                    self.prompt = None;
                    None
                }
                _ => match prompt.input.handle_event(event) {
                    Some(FieldEvent::Submit) => Some(SettingsEvent::Update {
                        field: prompt.field,
                        value: prompt.input.value().to_string(),
                    }),
                    _ => None,
                },
            };
        }

        match event {
            TuiEvent::Escape => Some(SettingsEvent::Close),
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let down = matches!(event, TuiEvent::CursorDown);
                self.selected = step_selection(self.selected, LOGOUT_ROW + 1, down);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => Some(match self.selected_field() {
                Some(field) => SettingsEvent::Edit(field),
                None => SettingsEvent::Logout,
            }),
            _ => None,
        }
    }
}

impl SettingsScreenState {
    /// The account field under the cursor, if the cursor is on one.
    pub fn selected_field(&self) -> Option<AccountField> {
        AccountField::ALL.get(self.selected).copied()
    }
}

/// Transient render wrapper for the settings overlay.
pub struct SettingsScreen<'a> {
    state: &'a mut SettingsScreenState,
    session: Option<&'a UserSession>,
    error: Option<&'a str>,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(
        state: &'a mut SettingsScreenState,
        session: Option<&'a UserSession>,
        error: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            session,
            error,
        }
    }
}

impl Component for SettingsScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" ⚙ Settings ")
            .title_bottom(Line::from(" ↑↓ Move  Enter Edit  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [since, list, error] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(LOGOUT_ROW as u16 + 1),
            Constraint::Length(1),
        ])
        .areas(inner);

        if let Some(session) = self.session {
            let when = session
                .logged_in_at()
                .with_timezone(&chrono::Local)
                .format("%H:%M");
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Signed in at {when}"),
                    Style::default().fg(Color::DarkGray),
                )),
                since,
            );
        }

        let mut items: Vec<ListItem> = AccountField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = self
                    .session
                    .map_or("", |s| s.display_value(*field))
                    .to_string();
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<10}", field.label()), style),
                    Span::styled(format!("  {value}"), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let logout_style = if self.state.selected == LOGOUT_ROW {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Red)
        };
        items.push(ListItem::new(Line::from(Span::styled("🚪 Logout", logout_style))));

        frame.render_stateful_widget(List::new(items), list, &mut self.state.list_state);

        if let Some(message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                error,
            );
        }

        if let Some(prompt) = self.state.prompt.as_mut() {
            let prompt_area = centered_rect(60, 30, overlay);
            let [field_area] = Layout::vertical([Constraint::Length(3)]).areas(prompt_area);
            frame.render_widget(Clear, field_area);
            prompt.input.render(frame, field_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn session() -> UserSession {
        account::login("alice", "alice@example.com", "secret").unwrap()
    }

    #[test]
    fn test_escape_closes() {
        let mut state = SettingsScreenState::new();
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(SettingsEvent::Close));
    }

    #[test]
    fn test_logout_row() {
        let mut state = SettingsScreenState::new();
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, LOGOUT_ROW);
        assert_eq!(state.selected_field(), None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(SettingsEvent::Logout));
    }

    #[test]
    fn test_prompt_prefills_and_submits() {
        let session = session();
        let mut state = SettingsScreenState::new();
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SettingsEvent::Edit(AccountField::Email))
        );

        state.open_prompt(AccountField::Email, Some(&session));
        assert!(state.is_editing());
        state.handle_event(&TuiEvent::InputChar('m'));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SettingsEvent::Update {
                field: AccountField::Email,
                value: "alice@example.comm".into(),
            })
        );
    }

    #[test]
    fn test_password_prompt_starts_empty() {
        let session = session();
        let mut state = SettingsScreenState::new();
        state.open_prompt(AccountField::Password, Some(&session));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SettingsEvent::Update {
                field: AccountField::Password,
                value: String::new(),
            })
        );
    }

    #[test]
    fn test_escape_in_prompt_only_closes_prompt() {
        let mut state = SettingsScreenState::new();
        state.open_prompt(AccountField::Username, None);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
        assert!(!state.is_editing());
    }

    #[test]
    fn test_render_masks_password() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let session = session();
        let mut state = SettingsScreenState::new();

        terminal
            .draw(|f| SettingsScreen::new(&mut state, Some(&session), None).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("alice@example.com"));
        assert!(text.contains("••••••••"));
        assert!(!text.contains("secret"));
        assert!(text.contains("Logout"));
    }
}
