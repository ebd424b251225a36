//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::account;
use crate::core::curriculum::Curriculum;
use crate::core::state::{App, Route, Tab};

/// Creates an App on the login screen with the built-in curriculum.
pub fn logged_out_app() -> App {
    App::new(Arc::new(
        Curriculum::builtin().expect("built-in curriculum must be valid"),
    ))
}

/// Creates an App already signed in as "tester" on the home tab.
pub fn test_app() -> App {
    let mut app = logged_out_app();
    app.session = Some(account::login("tester", "tester@example.com", "pw").unwrap());
    app.route = Route::Main(Tab::Home);
    app
}
