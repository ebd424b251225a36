use crate::core::account;
use crate::core::home::Greeting;
use crate::core::state::{App, Route, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    BudgetScreen, HomeScreen, LessonsScreen, LoginForm, SettingsScreen, TabBar,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [bar_area, main_area, help_area] = layout.areas(frame.area());

    TabBar::new(app.active_tab(), app.status_message.as_str()).render(frame, bar_area);

    match app.route {
        Route::Login => {
            LoginForm::new(&mut tui.login, app.error.as_deref()).render(frame, main_area);
        }
        Route::Main(tab) => draw_tab(frame, main_area, app, tui, tab),
        Route::Settings { return_to } => {
            draw_tab(frame, main_area, app, tui, return_to);
            SettingsScreen::new(&mut tui.settings, app.session.as_ref(), app.error.as_deref())
                .render(frame, main_area);
        }
    }

    draw_help_line(frame, help_area, app);
}

fn draw_tab(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, tab: Tab) {
    match tab {
        Tab::Home => {
            let name = account::display_name(app.session.as_ref());
            HomeScreen::new(&mut tui.home, Greeting::now(), &name, app.session.is_some())
                .render(frame, area);
        }
        Tab::Lessons => {
            LessonsScreen::new(&mut tui.lessons, &app.navigator, &app.curriculum, &app.ledger)
                .render(frame, area);
        }
        Tab::Budget => {
            BudgetScreen::new(
                &mut tui.budget,
                &app.budget,
                &app.currency_symbol,
                app.error.as_deref(),
            )
            .render(frame, area);
        }
    }
}

/// Key hints for the current route, or the last error on a tab.
fn draw_help_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = match (&app.route, &app.error) {
        (Route::Main(Tab::Home | Tab::Lessons), Some(error)) => {
            Span::styled(format!(" {error}"), Style::default().fg(Color::Red))
        }
        (route, _) => Span::styled(help_text(route), Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn help_text(route: &Route) -> &'static str {
    match route {
        Route::Login => " Tab Next field  Enter Sign in  Ctrl+S Show password  Esc Quit",
        Route::Main(_) => " Tab/Shift+Tab Switch tab  s Settings  q Quit  Ctrl+C Force quit",
        Route::Settings { .. } => " Esc Close settings",
    }
}
