//! # Application State
//!
//! Core business state for MoneyWise. Domain data only; presentation state
//! (cursors, open forms, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── curriculum: Arc<Curriculum>     // static lesson content
//! ├── navigator: Navigator            // lessons tab position
//! ├── ledger: CompletionLedger        // completed lessons/quizzes
//! ├── budget: Budget                  // income, expenses, savings
//! ├── session: Option<UserSession>    // signed-in user (None = logged out)
//! ├── route: Route                    // which screen is showing
//! ├── start_tab: Tab                  // tab opened after login
//! ├── currency_symbol: String         // prefix for amounts
//! ├── status_message: String          // status bar text
//! └── error: Option<String>           // last validation error
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::budget::{self, Budget};
use crate::core::config::ResolvedConfig;
use crate::core::curriculum::{Curriculum, Module};
use crate::core::account::UserSession;
use crate::core::ledger::CompletionLedger;
use crate::core::navigator::Navigator;

/// Bottom-level tabs of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Lessons,
    Budget,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Lessons, Tab::Budget];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Lessons => "Lessons",
            Tab::Budget => "Budget",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Lessons,
            Tab::Lessons => Tab::Budget,
            Tab::Budget => Tab::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Budget,
            Tab::Lessons => Tab::Home,
            Tab::Budget => Tab::Lessons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Main(Tab),
    /// Settings is stacked on top of a tab and returns to it when closed.
    Settings { return_to: Tab },
}

pub struct App {
    pub curriculum: Arc<Curriculum>,
    pub navigator: Navigator,
    pub ledger: CompletionLedger,
    pub budget: Budget,
    pub session: Option<UserSession>,
    pub route: Route,
    pub start_tab: Tab,
    pub sample_budget: bool,
    pub currency_symbol: String,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(curriculum: Arc<Curriculum>) -> Self {
        Self {
            curriculum,
            navigator: Navigator::new(),
            ledger: CompletionLedger::new(),
            budget: Budget::sample(),
            session: None,
            route: Route::Login,
            start_tab: Tab::default(),
            sample_budget: true,
            currency_symbol: String::from("$"),
            status_message: String::from("Welcome to MoneyWise!"),
            error: None,
        }
    }

    pub fn from_config(curriculum: Arc<Curriculum>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(curriculum);
        app.start_tab = config.start_tab;
        app.sample_budget = config.sample_budget;
        app.currency_symbol = config.currency_symbol.clone();
        app.budget = app.fresh_budget();
        app
    }

    pub fn fresh_budget(&self) -> Budget {
        if self.sample_budget {
            Budget::sample()
        } else {
            Budget::new()
        }
    }

    /// The tab underneath the current screen, if past the login screen.
    pub fn active_tab(&self) -> Option<Tab> {
        match self.route {
            Route::Login => None,
            Route::Main(tab) | Route::Settings { return_to: tab } => Some(tab),
        }
    }

    /// The module the lessons tab is currently inside, if any.
    pub fn current_module(&self) -> Option<&Module> {
        let id = self.navigator.current_module()?;
        self.curriculum.get_module(id).ok()
    }

    pub fn format_amount(&self, amount: i64) -> String {
        budget::format_amount(&self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{logged_out_app, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = logged_out_app();
        assert_eq!(app.route, Route::Login);
        assert!(app.session.is_none());
        assert_eq!(app.status_message, "Welcome to MoneyWise!");
        assert!(app.error.is_none());
        assert_eq!(app.active_tab(), None);
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Budget.next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Budget);
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_active_tab_under_settings() {
        let mut app = test_app();
        app.route = Route::Settings {
            return_to: Tab::Budget,
        };
        assert_eq!(app.active_tab(), Some(Tab::Budget));
    }

    #[test]
    fn test_format_amount() {
        let mut app = test_app();
        assert_eq!(app.format_amount(2400), "$2400");
        assert_eq!(app.format_amount(-35), "-$35");
        app.currency_symbol = "€".to_string();
        assert_eq!(app.format_amount(10), "€10");
    }
}
