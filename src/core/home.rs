//! # Home Dashboard
//!
//! Static content and small derivations for the home tab: the time-of-day
//! greeting, quick-action shortcuts and the tip of the day.

use crate::core::state::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// `hour` is a local 0-23 hour.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..12 => Greeting::Morning,
            12..17 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn now() -> Self {
        use chrono::Timelike;
        Self::for_hour(chrono::Local::now().hour())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good Morning",
            Greeting::Afternoon => "Good Afternoon",
            Greeting::Evening => "Good Evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub name: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
    pub target: Tab,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        name: "Budget Tracker",
        category: "Planning",
        icon: "📊",
        target: Tab::Budget,
    },
    QuickAction {
        name: "Lessons",
        category: "Learning",
        icon: "📚",
        target: Tab::Lessons,
    },
    // Savings and expenses both live on the budget tab.
    QuickAction {
        name: "Savings Goals",
        category: "Future",
        icon: "🎯",
        target: Tab::Budget,
    },
    QuickAction {
        name: "Expenses",
        category: "Tracking",
        icon: "💳",
        target: Tab::Budget,
    },
];

pub const TIP_OF_THE_DAY: &str =
    "Consider reducing dining out expenses to reach your savings goal faster.";

pub const WELCOME_TEXT: &str = "Great to have you here! Start by exploring your budget \
    tracker and setting up your first savings goal.";
