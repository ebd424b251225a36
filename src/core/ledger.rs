//! # Completion Ledger
//!
//! Records which lessons and quizzes have been completed this session.
//! Presence in the set means "done"; there is no way to un-mark an item.

use serde::Serialize;
use std::collections::HashSet;

use crate::core::curriculum::Module;

/// A completable item: one lesson of a module, or the module's quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionKey {
    Lesson { module: String, index: usize },
    Quiz { module: String },
}

impl CompletionKey {
    pub fn lesson(module: impl Into<String>, index: usize) -> Self {
        CompletionKey::Lesson {
            module: module.into(),
            index,
        }
    }

    pub fn quiz(module: impl Into<String>) -> Self {
        CompletionKey::Quiz {
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        match self {
            CompletionKey::Lesson { module, .. } | CompletionKey::Quiz { module } => module,
        }
    }
}

/// Per-module summary for the module grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleProgress {
    pub lessons_done: usize,
    pub lessons_total: usize,
    pub quiz_passed: bool,
}

impl ModuleProgress {
    pub fn is_finished(&self) -> bool {
        self.quiz_passed && self.lessons_done == self.lessons_total
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    completed: HashSet<CompletionKey>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as complete. Returns `true` the first time, `false` if it
    /// was already recorded.
    pub fn mark_complete(&mut self, key: CompletionKey) -> bool {
        self.completed.insert(key)
    }

    pub fn is_complete(&self, key: &CompletionKey) -> bool {
        self.completed.contains(key)
    }

    pub fn is_lesson_complete(&self, module: &str, index: usize) -> bool {
        self.is_complete(&CompletionKey::lesson(module, index))
    }

    pub fn is_quiz_complete(&self, module: &str) -> bool {
        self.is_complete(&CompletionKey::quiz(module))
    }

    pub fn progress(&self, module: &Module) -> ModuleProgress {
        let lessons_done = (0..module.lessons.len())
            .filter(|&i| self.is_lesson_complete(&module.id, i))
            .count();
        ModuleProgress {
            lessons_done,
            lessons_total: module.lessons.len(),
            quiz_passed: self.is_quiz_complete(&module.id),
        }
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
