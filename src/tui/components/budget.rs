//! # Budget Component
//!
//! Budget tracker tab: savings, income and expense tables, totals and how
//! much of the income is already spent.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BudgetScreenState` lives in `TuiState` (cursors, open forms)
//! - `BudgetScreen` is created each frame with the `Budget` as a prop
//!
//! ## Keys
//!
//! ```text
//! ←/→     switch between income and expenses
//! ↑/↓     move within the table
//! a       add an entry to the focused table
//! d d     delete the highlighted entry (press twice)
//! e       edit savings
//! ```
//!
//! While a form is open every key goes to the form; the app loop checks
//! [`BudgetScreenState::is_editing`] before applying global shortcuts.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Gauge, Padding, Paragraph, Row, Table, TableState};
use uuid::Uuid;

use crate::core::budget::{Budget, EntryKind, format_amount};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::components::{centered_rect, step_selection};
use crate::tui::event::TuiEvent;

/// Events emitted by the budget tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetEvent {
    Add {
        kind: EntryKind,
        name: String,
        amount: String,
    },
    Remove {
        kind: EntryKind,
        id: Uuid,
    },
    SetSavings(String),
}

/// The add-entry overlay.
struct EntryForm {
    kind: EntryKind,
    name: TextField,
    amount: TextField,
    on_amount: bool,
}

impl EntryForm {
    fn new(kind: EntryKind) -> Self {
        let mut form = Self {
            kind,
            name: TextField::new(" Name "),
            amount: TextField::new(" Amount "),
            on_amount: false,
        };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        self.name.focused = !self.on_amount;
        self.amount.focused = self.on_amount;
    }

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BudgetEvent> {
        let result = match event {
            TuiEvent::NextField | TuiEvent::PrevField | TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.on_amount = !self.on_amount;
                None
            }
            _ if self.on_amount => match self.amount.handle_event(event) {
                Some(FieldEvent::Submit) => Some(BudgetEvent::Add {
                    kind: self.kind,
                    name: self.name.value().to_string(),
                    amount: self.amount.value().to_string(),
                }),
                _ => None,
            },
            _ => {
                if let Some(FieldEvent::Submit) = self.name.handle_event(event) {
                    self.on_amount = true;
                }
                None
            }
        };
        self.sync_focus();
        result
    }
}

pub struct BudgetScreenState {
    pub focus: EntryKind,
    pub income_cursor: usize,
    pub expense_cursor: usize,
    /// First `d` arms deletion; any other key disarms it
    pub confirm_delete: bool,
    form: Option<EntryForm>,
    savings_edit: Option<TextField>,
    income_table: TableState,
    expense_table: TableState,
}

impl Default for BudgetScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetScreenState {
    pub fn new() -> Self {
        Self {
            focus: EntryKind::Income,
            income_cursor: 0,
            expense_cursor: 0,
            confirm_delete: false,
            form: None,
            savings_edit: None,
            income_table: TableState::default(),
            expense_table: TableState::default(),
        }
    }

    /// A form has keyboard focus.
    pub fn is_editing(&self) -> bool {
        self.form.is_some() || self.savings_edit.is_some()
    }

    /// Close whichever form is open, after its event was accepted.
    pub fn close_forms(&mut self) {
        self.form = None;
        self.savings_edit = None;
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            EntryKind::Income => &mut self.income_cursor,
            EntryKind::Expense => &mut self.expense_cursor,
        }
    }

    fn cursor(&self) -> usize {
        match self.focus {
            EntryKind::Income => self.income_cursor,
            EntryKind::Expense => self.expense_cursor,
        }
    }

    /// Handle a key with the current budget in view.
    pub fn handle_event(&mut self, event: &TuiEvent, budget: &Budget) -> Option<BudgetEvent> {
        if let Some(form) = self.form.as_mut() {
            if matches!(event, TuiEvent::Escape) {
                self.form = None;
                return None;
            }
            return form.handle_event(event);
        }
        if let Some(field) = self.savings_edit.as_mut() {
            return match event {
                TuiEvent::Escape => {
                    self.savings_edit = None;
                    None
                }
                _ => match field.handle_event(event) {
                    Some(FieldEvent::Submit) => Some(BudgetEvent::SetSavings(field.value().to_string())),
                    _ => None,
                },
            };
        }

        let is_delete_key = matches!(event, TuiEvent::InputChar('d') | TuiEvent::Delete);
        if !is_delete_key {
            self.confirm_delete = false;
        }

        let entries = budget.entries(self.focus);
        match event {
            TuiEvent::CursorLeft => {
                self.focus = EntryKind::Income;
                None
            }
            TuiEvent::CursorRight => {
                self.focus = EntryKind::Expense;
                None
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let down = matches!(event, TuiEvent::CursorDown);
                let len = entries.len();
                let cursor = self.cursor_mut();
                *cursor = step_selection(*cursor, len, down);
                None
            }
            TuiEvent::InputChar('a') => {
                self.form = Some(EntryForm::new(self.focus));
                None
            }
            TuiEvent::InputChar('e') => {
                let mut field = TextField::new(" Savings ").with_value(budget.savings().to_string());
                field.focused = true;
                self.savings_edit = Some(field);
                None
            }
            TuiEvent::InputChar('d') | TuiEvent::Delete => {
                let entry = entries.get(self.cursor())?;
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(BudgetEvent::Remove {
                        kind: self.focus,
                        id: entry.id,
                    })
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the budget tab.
pub struct BudgetScreen<'a> {
    state: &'a mut BudgetScreenState,
    budget: &'a Budget,
    currency: &'a str,
    error: Option<&'a str>,
}

impl<'a> BudgetScreen<'a> {
    pub fn new(
        state: &'a mut BudgetScreenState,
        budget: &'a Budget,
        currency: &'a str,
        error: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            budget,
            currency,
            error,
        }
    }

    fn money(&self, amount: u64) -> String {
        format_amount(self.currency, i64::try_from(amount).unwrap_or(i64::MAX))
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let [savings, remaining] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

        let savings_card = Paragraph::new(vec![
            Line::from(Span::styled("Total Savings", Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                self.money(self.budget.savings()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 🏦 Savings "),
        );
        frame.render_widget(savings_card, savings);

        let left = self.budget.remaining();
        let left_color = if left < 0 { Color::Red } else { Color::Cyan };
        let remaining_card = Paragraph::new(vec![
            Line::from(Span::styled("Remaining Budget", Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                format_amount(self.currency, left),
                Style::default().fg(left_color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 💵 Remaining "),
        );
        frame.render_widget(remaining_card, remaining);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, kind: EntryKind) {
        let focused = self.state.focus == kind;
        let entries = self.budget.entries(kind);
        let (cursor, color, icon) = match kind {
            EntryKind::Income => (&mut self.state.income_cursor, Color::Green, "💰"),
            EntryKind::Expense => (&mut self.state.expense_cursor, Color::Red, "💸"),
        };
        *cursor = (*cursor).min(entries.len().saturating_sub(1));
        let cursor = *cursor;

        let rows: Vec<Row> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut style = Style::default().fg(Color::Gray);
                if focused && i == cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                    if self.state.confirm_delete {
                        style = style.fg(Color::Red);
                    }
                }
                Row::new(vec![entry.name.clone(), self.money(entry.amount)]).style(style)
            })
            .collect();

        let border = if focused { color } else { Color::DarkGray };
        let total = format!(" Total {} ", self.money(self.budget.total(kind)));
        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(12)]).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title(format!(" {} {} ", icon, kind.label()))
                .title_bottom(Line::from(total).right_aligned()),
        );

        let table_state = match kind {
            EntryKind::Income => &mut self.state.income_table,
            EntryKind::Expense => &mut self.state.expense_table,
        };
        table_state.select((focused && !entries.is_empty()).then_some(cursor));
        frame.render_stateful_widget(table, area, table_state);
    }

    fn render_spent(&self, frame: &mut Frame, area: Rect) {
        match self.budget.spent_ratio() {
            Some(percent) => {
                let color = if percent > 100.0 { Color::Red } else { Color::Yellow };
                let gauge = Gauge::default()
                    .block(Block::new().padding(Padding::horizontal(1)))
                    .gauge_style(Style::default().fg(color))
                    .ratio((percent / 100.0).clamp(0.0, 1.0))
                    .label(format!("{percent:.0}% of income spent"));
                frame.render_widget(gauge, area);
            }
            None => frame.render_widget(
                Paragraph::new("Add income to see how much you spend")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                area,
            ),
        }
    }

    fn render_overlays(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(form) = self.state.form.as_mut() {
            let overlay = centered_rect(60, 50, area);
            frame.render_widget(Clear, overlay);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" Add {} ", form.kind.label()))
                .title_bottom(Line::from(" Tab Switch  Enter Save  Esc Cancel ").centered())
                .padding(Padding::horizontal(1));
            let inner = block.inner(overlay);
            frame.render_widget(block, overlay);

            let [name, amount, error] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .areas(inner);
            form.name.render(frame, name);
            form.amount.render(frame, amount);
            if let Some(message) = self.error {
                frame.render_widget(
                    Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                    error,
                );
            }
        } else if let Some(field) = self.state.savings_edit.as_mut() {
            let overlay = centered_rect(50, 30, area);
            let [field_area, error] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(overlay);
            frame.render_widget(Clear, overlay);
            field.render(frame, field_area);
            if let Some(message) = self.error {
                frame.render_widget(
                    Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                    error,
                );
            }
        }
    }
}

impl Component for BudgetScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [summary, tables, spent, help] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_summary(frame, summary);

        let [income, expenses] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(tables);
        self.render_table(frame, income, EntryKind::Income);
        self.render_table(frame, expenses, EntryKind::Expense);
        self.render_spent(frame, spent);

        let help_text = if self.state.confirm_delete {
            Span::styled(" Press d again to delete", Style::default().fg(Color::Red))
        } else {
            Span::styled(
                " ←→ Table  ↑↓ Move  a Add  d Delete  e Edit savings",
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(Paragraph::new(help_text), help);

        self.render_overlays(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut BudgetScreenState, budget: &Budget, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c), budget);
        }
    }

    #[test]
    fn test_add_form_emits_entry() {
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();
        state.handle_event(&TuiEvent::CursorRight, &budget);
        state.handle_event(&TuiEvent::InputChar('a'), &budget);
        assert!(state.is_editing());

        type_str(&mut state, &budget, "Rent");
        assert_eq!(state.handle_event(&TuiEvent::Submit, &budget), None);
        type_str(&mut state, &budget, "750");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &budget),
            Some(BudgetEvent::Add {
                kind: EntryKind::Expense,
                name: "Rent".into(),
                amount: "750".into(),
            })
        );
        // Stays open until the caller accepts it
        assert!(state.is_editing());
        state.close_forms();
        assert!(!state.is_editing());
    }

    #[test]
    fn test_escape_cancels_form() {
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();
        state.handle_event(&TuiEvent::InputChar('a'), &budget);
        state.handle_event(&TuiEvent::Escape, &budget);
        assert!(!state.is_editing());
    }

    #[test]
    fn test_delete_needs_two_presses() {
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();
        state.handle_event(&TuiEvent::CursorDown, &budget);

        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &budget), None);
        assert!(state.confirm_delete);
        let scholarship = budget.entries(EntryKind::Income)[1].id;
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &budget),
            Some(BudgetEvent::Remove {
                kind: EntryKind::Income,
                id: scholarship,
            })
        );
    }

    #[test]
    fn test_other_key_disarms_delete() {
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();
        state.handle_event(&TuiEvent::InputChar('d'), &budget);
        state.handle_event(&TuiEvent::CursorDown, &budget);
        assert!(!state.confirm_delete);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &budget), None);
    }

    #[test]
    fn test_delete_on_empty_table_does_nothing() {
        let budget = Budget::new();
        let mut state = BudgetScreenState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &budget), None);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_savings_edit_prefills_current_value() {
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();
        state.handle_event(&TuiEvent::InputChar('e'), &budget);
        state.handle_event(&TuiEvent::InputChar('0'), &budget);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &budget),
            Some(BudgetEvent::SetSavings("5000".into()))
        );
    }

    #[test]
    fn test_render_shows_totals() {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let budget = Budget::sample();
        let mut state = BudgetScreenState::new();

        terminal
            .draw(|f| BudgetScreen::new(&mut state, &budget, "$", None).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("$2400"));
        assert!(text.contains("$500"));
        assert!(text.contains("Part-time Job"));
        assert!(text.contains("Total $1100"));
        assert!(text.contains("31% of income spent"));
    }
}
