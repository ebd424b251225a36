//! # Core Application Logic
//!
//! This module contains MoneyWise's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Mobile   │      │    API     │
//!     │  Adapter   │      │  Adapter   │      │  (future)  │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct holding all application state
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`curriculum`]: Static lesson modules and quizzes
//! - [`ledger`]: Which lessons and quizzes are done
//! - [`navigator`]: The lessons tab state machine
//! - [`account`]: The signed-in user's session
//! - [`budget`]: Income, expenses and savings
//! - [`home`]: Home tab content
//! - [`config`]: Settings file and overrides

pub mod account;
pub mod action;
pub mod budget;
pub mod config;
pub mod curriculum;
pub mod home;
pub mod ledger;
pub mod navigator;
pub mod state;
