//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TabBar`: brand, tab strip and status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Each screen keeps a persistent `*State` in `TuiState` and is drawn through
//! a transient wrapper that borrows it for one frame:
//! - `LoginForm`: sign-in fields
//! - `HomeScreen`: greeting, tip and quick actions
//! - `LessonsScreen`: module grid, lesson list, lesson reader, quiz
//! - `BudgetScreen`: income/expense tables with the add-entry form
//! - `SettingsScreen`: account fields and logout
//! - `TextField`: single-line input shared by the forms above
//!
//! ## Props-Based Data Flow
//!
//! Components receive domain data from `App` as props and never mutate it.
//! User intent leaves a component as a high-level event which `tui::mod`
//! turns into an `Action`.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! HomeScreen::new(&mut tui.home, greeting, &name, logged_in).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── tab_bar.rs      (top status bar)
//! ├── text_field.rs   (single-line input)
//! ├── login.rs        (sign-in form)
//! ├── home.rs         (dashboard)
//! ├── lessons.rs      (learning flow)
//! ├── budget.rs       (budget tracker)
//! └── settings.rs     (account overlay)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod budget;
pub mod home;
pub mod lessons;
pub mod login;
pub mod settings;
mod tab_bar;
pub mod text_field;

pub use budget::{BudgetEvent, BudgetScreen, BudgetScreenState};
pub use home::{HomeEvent, HomeScreen, HomeScreenState};
pub use lessons::{LessonsScreen, LessonsScreenState};
pub use login::{LoginEvent, LoginForm, LoginFormState};
pub use settings::{SettingsEvent, SettingsScreen, SettingsScreenState};
pub use tab_bar::TabBar;
pub use text_field::{FieldEvent, TextField};

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// Move a list cursor one step, clamped to `len`.
pub(crate) fn step_selection(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}
