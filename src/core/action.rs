//! # Actions
//!
//! Everything that can happen in MoneyWise becomes an `Action`.
//! User signs in? That's `Action::Login { .. }`.
//! User taps "Next" in a lesson? That's `Action::Lesson(LessonEvent::Next)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the adapter to carry out. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! Failed actions leave the state as it was and describe the problem in
//! `app.error`. A successful action clears any previous error.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::account::{self, AccountField};
use crate::core::budget::{EntryKind, parse_amount};
use crate::core::navigator::{LessonEvent, Transition};
use crate::core::state::{App, Route, Tab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    SwitchTab(Tab),
    OpenSettings,
    CloseSettings,
    UpdateAccount {
        field: AccountField,
        value: String,
    },
    Lesson(LessonEvent),
    AddBudgetEntry {
        kind: EntryKind,
        name: String,
        amount: String,
    },
    RemoveBudgetEntry {
        kind: EntryKind,
        id: Uuid,
    },
    SetSavings(String),
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    // Everything past the login screen needs a session.
    if app.route == Route::Login && !matches!(action, Action::Login { .. } | Action::Quit) {
        debug!("Ignoring {:?} while logged out", action);
        return Effect::None;
    }

    match action {
        Action::Quit => {
            info!("Quit requested");
            return Effect::Quit;
        }
        Action::Login {
            username,
            email,
            password,
        } => match account::login(&username, &email, &password) {
            Ok(session) => {
                info!("Signed in as {}", session.username());
                app.status_message = format!("Signed in as {}", session.username());
                app.session = Some(session);
                app.route = Route::Main(app.start_tab);
                app.error = None;
            }
            Err(e) => {
                debug!("Login rejected: {}", e);
                app.error = Some(e.to_string());
            }
        },
        Action::Logout => {
            info!("Signed out");
            app.session = None;
            app.navigator.reset();
            app.ledger = Default::default();
            app.budget = app.fresh_budget();
            app.route = Route::Login;
            app.status_message = String::from("Signed out");
            app.error = None;
        }
        Action::SwitchTab(tab) => {
            app.route = Route::Main(tab);
            app.error = None;
        }
        Action::OpenSettings => {
            if let Route::Main(tab) = app.route {
                app.route = Route::Settings { return_to: tab };
            }
        }
        Action::CloseSettings => {
            if let Route::Settings { return_to } = app.route {
                app.route = Route::Main(return_to);
            }
        }
        Action::UpdateAccount { field, value } => {
            let Some(session) = app.session.as_mut() else {
                warn!("Account update without a session");
                return Effect::None;
            };
            match session.update(field, &value) {
                Ok(()) => {
                    info!("{} updated", field.label());
                    app.status_message = format!("{} updated!", field.label());
                    app.error = None;
                }
                Err(e) => app.error = Some(e.to_string()),
            }
        }
        Action::Lesson(event) => {
            match app
                .navigator
                .apply(event, &app.curriculum, &mut app.ledger)
            {
                Ok(Transition::Applied) => app.error = None,
                Ok(Transition::Ignored) => {}
                Err(e) => {
                    warn!("Lesson navigation failed: {}", e);
                    app.error = Some(e.to_string());
                }
            }
        }
        Action::AddBudgetEntry { kind, name, amount } => {
            let result = parse_amount(&amount)
                .and_then(|amount| app.budget.add_entry(kind, &name, amount));
            match result {
                Ok(_) => {
                    debug!("{} entry added: {}", kind.label(), name.trim());
                    app.status_message = format!("{} added", kind.label());
                    app.error = None;
                }
                Err(e) => app.error = Some(e.to_string()),
            }
        }
        Action::RemoveBudgetEntry { kind, id } => match app.budget.remove_entry(kind, id) {
            Ok(entry) => {
                debug!("{} entry removed: {}", kind.label(), entry.name);
                app.status_message = format!("Removed {}", entry.name);
                app.error = None;
            }
            Err(e) => app.error = Some(e.to_string()),
        },
        Action::SetSavings(text) => {
            match parse_amount(&text).and_then(|amount| app.budget.set_savings(amount)) {
                Ok(()) => app.error = None,
                Err(e) => app.error = Some(e.to_string()),
            }
        }
    }

    Effect::None
}
