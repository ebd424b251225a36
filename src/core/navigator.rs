//! # Lesson Navigator
//!
//! View-state machine for the learning flow.
//!
//! ```text
//!              select_module            select_lesson
//! ModuleList ───────────────▶ LessonList ─────────────▶ LessonDetail ⟲ next/previous/mark_done
//!      ▲          back           │  ▲          back           │
//!      └─────────────────────────┘  └─────────────────────────┘
//!                                │  ▲
//!                    select_quiz │  │ back
//!                                ▼  │
//!                                Quiz ⟲ choose_answer/submit
//! ```
//!
//! Events are fed through [`Navigator::apply`]. A guard failure or an event
//! that means nothing in the current view returns [`Transition::Ignored`] and
//! leaves the state untouched. The only error is an unknown module id passed
//! to `SelectModule`.
//!
//! The position is stored as a sum type so per-view fields (lesson index,
//! quiz attempt) only exist while that view is active. [`NavigatorSnapshot`]
//! flattens it back into a plain record for readers.

use log::{debug, info};
use serde::Serialize;

use crate::core::curriculum::{Curriculum, CurriculumError, Quiz};
use crate::core::ledger::{CompletionKey, CompletionLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    ModuleList,
    LessonList,
    LessonDetail,
    Quiz,
}

/// One visit to a quiz. Re-entering the quiz starts a fresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizAttempt {
    pub selected: Option<usize>,
    pub revealed: bool,
}

impl QuizAttempt {
    /// `Some(correct)` once the result is revealed.
    pub fn outcome(&self, quiz: &Quiz) -> Option<bool> {
        match (self.revealed, self.selected) {
            (true, Some(answer)) => Some(quiz.is_correct(answer)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Screen {
    #[default]
    ModuleList,
    LessonList {
        module: String,
    },
    LessonDetail {
        module: String,
        index: usize,
    },
    Quiz {
        module: String,
        attempt: QuizAttempt,
    },
}

/// User intents understood by the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonEvent {
    SelectModule(String),
    SelectLesson(usize),
    SelectQuiz,
    Back,
    Next,
    Previous,
    MarkDone,
    ChooseAnswer(usize),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// Read-only copy of the navigator position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigatorSnapshot {
    pub view: View,
    pub current_module: Option<String>,
    pub current_lesson_index: Option<usize>,
    pub selected_answer: Option<usize>,
    pub result_revealed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    screen: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.screen = Screen::ModuleList;
    }

    pub fn view(&self) -> View {
        match self.screen {
            Screen::ModuleList => View::ModuleList,
            Screen::LessonList { .. } => View::LessonList,
            Screen::LessonDetail { .. } => View::LessonDetail,
            Screen::Quiz { .. } => View::Quiz,
        }
    }

    pub fn current_module(&self) -> Option<&str> {
        match &self.screen {
            Screen::ModuleList => None,
            Screen::LessonList { module }
            | Screen::LessonDetail { module, .. }
            | Screen::Quiz { module, .. } => Some(module),
        }
    }

    pub fn current_lesson_index(&self) -> Option<usize> {
        match self.screen {
            Screen::LessonDetail { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn quiz_attempt(&self) -> Option<&QuizAttempt> {
        match &self.screen {
            Screen::Quiz { attempt, .. } => Some(attempt),
            _ => None,
        }
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.quiz_attempt().and_then(|a| a.selected)
    }

    pub fn result_revealed(&self) -> bool {
        self.quiz_attempt().is_some_and(|a| a.revealed)
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            view: self.view(),
            current_module: self.current_module().map(str::to_string),
            current_lesson_index: self.current_lesson_index(),
            selected_answer: self.selected_answer(),
            result_revealed: self.result_revealed(),
        }
    }

    /// Apply one user intent.
    ///
    /// Completion events (`MarkDone`, a correct `Submit`) are written to `ledger`.
    pub fn apply(
        &mut self,
        event: LessonEvent,
        curriculum: &Curriculum,
        ledger: &mut CompletionLedger,
    ) -> Result<Transition, CurriculumError> {
        let view = self.view();
        let (transition, next) = match (&mut self.screen, event.clone()) {
            (Screen::ModuleList, LessonEvent::SelectModule(id)) => {
                let module = curriculum.get_module(&id)?;
                let next = Screen::LessonList {
                    module: module.id.clone(),
                };
                (Transition::Applied, Some(next))
            }

            (Screen::LessonList { module }, LessonEvent::SelectLesson(index)) => {
                if index < curriculum.get_module(module)?.lesson_count() {
                    let next = Screen::LessonDetail {
                        module: module.clone(),
                        index,
                    };
                    (Transition::Applied, Some(next))
                } else {
                    (Transition::Ignored, None)
                }
            }
            (Screen::LessonList { module }, LessonEvent::SelectQuiz) => {
                let next = Screen::Quiz {
                    module: module.clone(),
                    attempt: QuizAttempt::default(),
                };
                (Transition::Applied, Some(next))
            }
            (Screen::LessonList { .. }, LessonEvent::Back) => {
                (Transition::Applied, Some(Screen::ModuleList))
            }

            (Screen::LessonDetail { module, index }, LessonEvent::Next) => {
                if *index + 1 < curriculum.get_module(module)?.lesson_count() {
                    *index += 1;
                    (Transition::Applied, None)
                } else {
                    (Transition::Ignored, None)
                }
            }
            (Screen::LessonDetail { index, .. }, LessonEvent::Previous) => {
                if *index > 0 {
                    *index -= 1;
                    (Transition::Applied, None)
                } else {
                    (Transition::Ignored, None)
                }
            }
            (Screen::LessonDetail { module, index }, LessonEvent::MarkDone) => {
                if ledger.mark_complete(CompletionKey::lesson(module.as_str(), *index)) {
                    info!("Lesson completed: {} #{}", module, index);
                }
                (Transition::Applied, None)
            }
            (Screen::LessonDetail { module, .. }, LessonEvent::Back) => {
                let next = Screen::LessonList {
                    module: module.clone(),
                };
                (Transition::Applied, Some(next))
            }

            (Screen::Quiz { module, attempt }, LessonEvent::ChooseAnswer(answer)) => {
                let options = curriculum.get_module(module)?.quiz.options.len();
                if !attempt.revealed && answer < options {
                    attempt.selected = Some(answer);
                    (Transition::Applied, None)
                } else {
                    (Transition::Ignored, None)
                }
            }
            (Screen::Quiz { module, attempt }, LessonEvent::Submit) => match attempt.selected {
                Some(answer) if !attempt.revealed => {
                    let quiz = &curriculum.get_module(module)?.quiz;
                    attempt.revealed = true;
                    if quiz.is_correct(answer) {
                        if ledger.mark_complete(CompletionKey::quiz(module.as_str())) {
                            info!("Quiz passed: {}", module);
                        }
                    } else {
                        debug!("Quiz answer {} incorrect for {}", answer, module);
                    }
                    (Transition::Applied, None)
                }
                _ => (Transition::Ignored, None),
            },
            (Screen::Quiz { module, .. }, LessonEvent::Back) => {
                let next = Screen::LessonList {
                    module: module.clone(),
                };
                (Transition::Applied, Some(next))
            }

            _ => (Transition::Ignored, None),
        };

        if let Some(next) = next {
            self.screen = next;
        }
        match transition {
            Transition::Applied => debug!("{:?}: {:?} -> {:?}", event, view, self.view()),
            Transition::Ignored => debug!("{:?} ignored in {:?}", event, view),
        }
        Ok(transition)
    }
}
