//! # Budget Tracker
//!
//! Income and expense records plus a savings figure. Amounts are whole
//! currency units. Totals are plain sums; nothing here models interest,
//! currencies or dates.
//!
//! Every amount and every per-kind total stays within [`MAX_AMOUNT`], so
//! totals never overflow and `remaining()` always fits an `i64`.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Largest amount, savings figure or per-kind total the budget accepts.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub name: String,
    pub amount: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("entry name cannot be empty")]
    EmptyName,
    #[error("not a valid amount: {0:?}")]
    InvalidAmount(String),
    #[error("amount too large")]
    AmountTooLarge,
    #[error("no {} entry with id {id}", .kind.label().to_lowercase())]
    NotFound { kind: EntryKind, id: Uuid },
}

/// Parse a user-typed amount. Accepts a leading `$` and thousands commas;
/// blank input is zero.
pub fn parse_amount(input: &str) -> Result<u64, BudgetError> {
    let trimmed = input.trim();
    let digits: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BudgetError::InvalidAmount(input.to_string()));
    }
    match digits.parse::<u64>() {
        Ok(amount) if amount <= MAX_AMOUNT => Ok(amount),
        // All digits, so the only failure left is size
        _ => Err(BudgetError::AmountTooLarge),
    }
}

/// `symbol` then the absolute amount, with a leading minus when negative.
pub fn format_amount(symbol: &str, amount: i64) -> String {
    if amount < 0 {
        format!("-{}{}", symbol, amount.unsigned_abs())
    } else {
        format!("{}{}", symbol, amount)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Budget {
    income: Vec<BudgetEntry>,
    expenses: Vec<BudgetEntry>,
    savings: u64,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter figures shown to a new user.
    pub fn sample() -> Self {
        let mut budget = Self::new();
        for (kind, name, amount) in [
            (EntryKind::Income, "Part-time Job", 2000),
            (EntryKind::Income, "Scholarship", 1500),
            (EntryKind::Expense, "Groceries", 600),
            (EntryKind::Expense, "Transport", 200),
            (EntryKind::Expense, "Utilities", 300),
        ] {
            budget.push(kind, name.to_string(), amount);
        }
        budget.savings = 500;
        budget
    }

    fn list(&self, kind: EntryKind) -> &Vec<BudgetEntry> {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expenses,
        }
    }

    fn list_mut(&mut self, kind: EntryKind) -> &mut Vec<BudgetEntry> {
        match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expenses,
        }
    }

    fn push(&mut self, kind: EntryKind, name: String, amount: u64) -> Uuid {
        let id = Uuid::new_v4();
        self.list_mut(kind).push(BudgetEntry { id, name, amount });
        id
    }

    pub fn add_entry(&mut self, kind: EntryKind, name: &str, amount: u64) -> Result<Uuid, BudgetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::EmptyName);
        }
        match self.total(kind).checked_add(amount) {
            Some(total) if total <= MAX_AMOUNT => Ok(self.push(kind, name.to_string(), amount)),
            _ => Err(BudgetError::AmountTooLarge),
        }
    }

    pub fn remove_entry(&mut self, kind: EntryKind, id: Uuid) -> Result<BudgetEntry, BudgetError> {
        let list = self.list_mut(kind);
        let pos = list
            .iter()
            .position(|e| e.id == id)
            .ok_or(BudgetError::NotFound { kind, id })?;
        Ok(list.remove(pos))
    }

    pub fn entries(&self, kind: EntryKind) -> &[BudgetEntry] {
        self.list(kind)
    }

    pub fn total(&self, kind: EntryKind) -> u64 {
        self.list(kind).iter().map(|e| e.amount).sum()
    }

    /// Income minus expenses. Negative when overspent.
    pub fn remaining(&self) -> i64 {
        // Both totals are at most MAX_AMOUNT, so the casts and the difference fit
        self.total(EntryKind::Income) as i64 - self.total(EntryKind::Expense) as i64
    }

    pub fn savings(&self) -> u64 {
        self.savings
    }

    pub fn set_savings(&mut self, amount: u64) -> Result<(), BudgetError> {
        if amount > MAX_AMOUNT {
            return Err(BudgetError::AmountTooLarge);
        }
        self.savings = amount;
        Ok(())
    }

    /// Expenses as a percentage of income, or `None` with no income.
    pub fn spent_ratio(&self) -> Option<f64> {
        let income = self.total(EntryKind::Income);
        if income == 0 {
            return None;
        }
        Some(self.total(EntryKind::Expense) as f64 / income as f64 * 100.0)
    }
}
