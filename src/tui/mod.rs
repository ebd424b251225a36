//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! TuiEvent ──▶ Ctrl+C? ──yes──▶ Action::Quit
//!                │
//!                ▼
//!          route: Login ────▶ LoginFormState ──▶ Action::Login / Quit
//!                 Settings ─▶ SettingsScreenState ──▶ UpdateAccount / Logout / CloseSettings
//!                 Main(tab) ▶ global keys (Tab, Shift+Tab, s, q) unless a form is open,
//!                             then the tab's component ──▶ Lesson / budget actions
//! ```
//!
//! Forms that submit a value (budget entry, savings, account field) stay
//! open when `update()` reports an error so the user can correct the input.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after events.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::curriculum::Curriculum;
use crate::core::state::{App, Route, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BudgetEvent, BudgetScreenState, HomeEvent, HomeScreenState, LessonsScreenState, LoginEvent,
    LoginFormState, SettingsEvent, SettingsScreenState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login: LoginFormState,
    pub home: HomeScreenState,
    pub lessons: LessonsScreenState,
    pub budget: BudgetScreenState,
    pub settings: SettingsScreenState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            login: LoginFormState::new(),
            home: HomeScreenState::new(),
            lessons: LessonsScreenState::new(),
            budget: BudgetScreenState::new(),
            settings: SettingsScreenState::new(),
        }
    }

    /// A text input on the current route owns the keyboard.
    fn is_editing(&self, route: Route) -> bool {
        match route {
            Route::Login => true,
            Route::Main(Tab::Budget) => self.budget.is_editing(),
            Route::Main(_) => false,
            Route::Settings { .. } => self.settings.is_editing(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are filtered in event.rs; the flag lets Esc arrive unambiguously
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig, curriculum: Arc<Curriculum>) -> std::io::Result<()> {
    let mut app = App::from_config(curriculum, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event to the component that owns it.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return dispatch(app, tui, Action::Quit),
        _ => {}
    }

    if let Route::Main(tab) = app.route
        && !tui.is_editing(app.route)
    {
        let global = match event {
            TuiEvent::NextField => Some(Action::SwitchTab(tab.next())),
            TuiEvent::PrevField => Some(Action::SwitchTab(tab.prev())),
            TuiEvent::InputChar('s') => Some(Action::OpenSettings),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => None,
        };
        if let Some(action) = global {
            return dispatch(app, tui, action);
        }
    }

    match app.route {
        Route::Login => match tui.login.handle_event(&event) {
            Some(LoginEvent::Submit {
                username,
                email,
                password,
            }) => dispatch(
                app,
                tui,
                Action::Login {
                    username,
                    email,
                    password,
                },
            ),
            Some(LoginEvent::Quit) => dispatch(app, tui, Action::Quit),
            None => Effect::None,
        },
        Route::Settings { .. } => match tui.settings.handle_event(&event) {
            Some(SettingsEvent::Edit(field)) => {
                tui.settings.open_prompt(field, app.session.as_ref());
                Effect::None
            }
            Some(SettingsEvent::Update { field, value }) => {
                let effect = dispatch(app, tui, Action::UpdateAccount { field, value });
                if app.error.is_none() {
                    tui.settings.close_prompt();
                }
                effect
            }
            Some(SettingsEvent::Logout) => dispatch(app, tui, Action::Logout),
            Some(SettingsEvent::Close) => dispatch(app, tui, Action::CloseSettings),
            None => Effect::None,
        },
        Route::Main(Tab::Home) => match tui.home.handle_event(&event) {
            Some(HomeEvent::Open(target)) => dispatch(app, tui, Action::SwitchTab(target)),
            None => Effect::None,
        },
        Route::Main(Tab::Lessons) => {
            match tui
                .lessons
                .handle_event(&event, &app.navigator, &app.curriculum)
            {
                Some(lesson_event) => dispatch(app, tui, Action::Lesson(lesson_event)),
                None => Effect::None,
            }
        }
        Route::Main(Tab::Budget) => {
            let action = match tui.budget.handle_event(&event, &app.budget) {
                Some(BudgetEvent::Add { kind, name, amount }) => {
                    Action::AddBudgetEntry { kind, name, amount }
                }
                Some(BudgetEvent::Remove { kind, id }) => Action::RemoveBudgetEntry { kind, id },
                Some(BudgetEvent::SetSavings(amount)) => Action::SetSavings(amount),
                None => return Effect::None,
            };
            let effect = dispatch(app, tui, action);
            if app.error.is_none() {
                tui.budget.close_forms();
            }
            effect
        }
    }
}

/// Run `update()` and keep presentation state consistent with the result.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    debug!("Dispatching {:?}", action);
    let was_logged_in = app.session.is_some();
    let effect = update(app, action);

    match (was_logged_in, app.session.is_some()) {
        // Signed in: clear the typed credentials
        (false, true) => tui.login = LoginFormState::new(),
        // Signed out: every screen starts over
        (true, false) => *tui = TuiState::new(),
        _ => {}
    }
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::budget::EntryKind;
    use crate::core::navigator::View;
    use crate::test_support::{logged_out_app, test_app};

    fn send(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Effect {
        let mut last = Effect::None;
        for event in events {
            last = handle_event(app, tui, event.clone());
        }
        last
    }

    fn type_str(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_login_flow() {
        let mut app = logged_out_app();
        let mut tui = TuiState::new();

        type_str(&mut app, &mut tui, "sam");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        type_str(&mut app, &mut tui, "sam@example.com");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        // An empty password is rejected
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.error.as_deref(), Some("Please fill in all fields"));

        type_str(&mut app, &mut tui, "hunter2");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert_eq!(app.route, Route::Main(Tab::Home));
        assert_eq!(app.session.as_ref().map(|s| s.username()), Some("sam"));
    }

    #[test]
    fn test_q_is_typed_on_login_but_quits_on_tabs() {
        let mut app = logged_out_app();
        let mut tui = TuiState::new();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('q')),
            Effect::None
        );

        let mut app = test_app();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('q')),
            Effect::Quit
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = logged_out_app();
        let mut tui = TuiState::new();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ForceQuit),
            Effect::Quit
        );
    }

    #[test]
    fn test_tab_keys_cycle_tabs() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, &[TuiEvent::NextField]);
        assert_eq!(app.route, Route::Main(Tab::Lessons));
        send(&mut app, &mut tui, &[TuiEvent::PrevField, TuiEvent::PrevField]);
        assert_eq!(app.route, Route::Main(Tab::Budget));
    }

    #[test]
    fn test_home_quick_action_opens_tab() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, &[TuiEvent::CursorDown, TuiEvent::Submit]);
        assert_eq!(app.route, Route::Main(Tab::Lessons));
    }

    #[test]
    fn test_lesson_keys_drive_navigator() {
        let mut app = test_app();
        app.route = Route::Main(Tab::Lessons);
        let mut tui = TuiState::new();

        send(
            &mut app,
            &mut tui,
            &[TuiEvent::Submit, TuiEvent::Submit, TuiEvent::InputChar('d')],
        );
        assert_eq!(app.navigator.view(), View::LessonDetail);
        assert!(app.ledger.is_lesson_complete("basics", 0));
    }

    #[test]
    fn test_budget_form_keeps_open_on_error() {
        let mut app = test_app();
        app.route = Route::Main(Tab::Budget);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::InputChar('a')]);
        type_str(&mut app, &mut tui, "Bonus");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        type_str(&mut app, &mut tui, "lots");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert!(app.error.is_some());
        assert!(tui.budget.is_editing());

        // 'q' goes into the form instead of quitting
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('q')),
            Effect::None
        );

        send(&mut app, &mut tui, &[TuiEvent::CursorHome]);
        for _ in 0.."lotsq".len() {
            handle_event(&mut app, &mut tui, TuiEvent::Delete);
        }
        type_str(&mut app, &mut tui, "250");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert!(app.error.is_none());
        assert!(!tui.budget.is_editing());
        assert_eq!(app.budget.total(EntryKind::Income), 3750);
    }

    #[test]
    fn test_settings_update_and_logout() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::InputChar('s')]);
        assert_eq!(
            app.route,
            Route::Settings {
                return_to: Tab::Home
            }
        );

        // Edit username
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        type_str(&mut app, &mut tui, "2");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert_eq!(app.session.as_ref().map(|s| s.username()), Some("tester2"));
        assert!(!tui.settings.is_editing());

        send(
            &mut app,
            &mut tui,
            &[
                TuiEvent::CursorDown,
                TuiEvent::CursorDown,
                TuiEvent::CursorDown,
                TuiEvent::Submit,
            ],
        );
        assert_eq!(app.route, Route::Login);
        assert!(app.session.is_none());
        assert_eq!(tui.settings.selected, 0);
    }

    #[test]
    fn test_escape_closes_settings() {
        let mut app = test_app();
        app.route = Route::Settings {
            return_to: Tab::Lessons,
        };
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, &[TuiEvent::Escape]);
        assert_eq!(app.route, Route::Main(Tab::Lessons));
    }
}
