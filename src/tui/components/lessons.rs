//! # Lessons Component
//!
//! The learning tab. Draws whichever view the navigator is in:
//!
//! 1. **Module grid**: one card per module with lesson and quiz progress
//! 2. **Lesson list**: the module's lessons plus a quiz row at the end
//! 3. **Lesson reader**: markdown content in a scroll view with Previous/Next
//! 4. **Quiz**: question, options and the result banner once submitted
//!
//! ## State Split
//!
//! The navigator in `App` owns *where* the user is. `LessonsScreenState`
//! only owns cursors and the reader scroll offset. Keys are translated into
//! `LessonEvent`s and sent through `update()`; this component never touches
//! the ledger directly.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::curriculum::{Curriculum, Module};
use crate::core::ledger::CompletionLedger;
use crate::core::navigator::{LessonEvent, Navigator, View};
use crate::tui::component::Component;
use crate::tui::components::step_selection;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

const GRID_COLUMNS: usize = 2;
const CARD_HEIGHT: u16 = 5;

/// Persistent presentation state for the lessons tab.
pub struct LessonsScreenState {
    /// Highlighted card in the module grid
    pub module_cursor: usize,
    /// Highlighted row in the lesson list; `lesson_count` is the quiz row
    pub lesson_cursor: usize,
    /// Highlighted quiz option
    pub option_cursor: usize,
    scroll_state: ScrollViewState,
    list_state: ListState,
    /// Lesson the reader was last scrolled in, so a new lesson starts at the top
    reading: Option<(String, usize)>,
}

impl Default for LessonsScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl LessonsScreenState {
    pub fn new() -> Self {
        Self {
            module_cursor: 0,
            lesson_cursor: 0,
            option_cursor: 0,
            scroll_state: ScrollViewState::default(),
            list_state: ListState::default(),
            reading: None,
        }
    }

    /// Translate a key into a navigator intent for the current view.
    ///
    /// Cursor movement is handled locally and returns `None`.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        navigator: &Navigator,
        curriculum: &Curriculum,
    ) -> Option<LessonEvent> {
        let module = navigator
            .current_module()
            .and_then(|id| curriculum.get_module(id).ok());

        match (navigator.view(), event) {
            (View::ModuleList, TuiEvent::CursorUp) => {
                self.module_cursor = self.module_cursor.saturating_sub(GRID_COLUMNS);
                None
            }
            (View::ModuleList, TuiEvent::CursorDown) => {
                let last = curriculum.len().saturating_sub(1);
                self.module_cursor = (self.module_cursor + GRID_COLUMNS).min(last);
                None
            }
            (View::ModuleList, TuiEvent::CursorLeft | TuiEvent::CursorRight) => {
                let down = matches!(event, TuiEvent::CursorRight);
                self.module_cursor = step_selection(self.module_cursor, curriculum.len(), down);
                None
            }
            (View::ModuleList, TuiEvent::Submit) => {
                let module = curriculum.list_modules().get(self.module_cursor)?;
                self.lesson_cursor = 0;
                Some(LessonEvent::SelectModule(module.id.clone()))
            }

            (View::LessonList, TuiEvent::CursorUp | TuiEvent::CursorDown) => {
                let rows = module.map_or(0, |m| m.lesson_count() + 1);
                let down = matches!(event, TuiEvent::CursorDown);
                self.lesson_cursor = step_selection(self.lesson_cursor, rows, down);
                None
            }
            (View::LessonList, TuiEvent::Submit) => {
                if self.lesson_cursor < module?.lesson_count() {
                    Some(LessonEvent::SelectLesson(self.lesson_cursor))
                } else {
                    self.option_cursor = 0;
                    Some(LessonEvent::SelectQuiz)
                }
            }

            (View::LessonDetail, TuiEvent::CursorRight | TuiEvent::InputChar('n')) => {
                Some(LessonEvent::Next)
            }
            (View::LessonDetail, TuiEvent::CursorLeft | TuiEvent::InputChar('p')) => {
                Some(LessonEvent::Previous)
            }
            (View::LessonDetail, TuiEvent::Submit | TuiEvent::InputChar('d')) => {
                Some(LessonEvent::MarkDone)
            }
            (View::LessonDetail, TuiEvent::CursorUp) => {
                self.scroll_state.scroll_up();
                None
            }
            (View::LessonDetail, TuiEvent::CursorDown) => {
                self.scroll_state.scroll_down();
                None
            }
            (View::LessonDetail, TuiEvent::PageUp) => {
                self.scroll_state.scroll_page_up();
                None
            }
            (View::LessonDetail, TuiEvent::PageDown) => {
                self.scroll_state.scroll_page_down();
                None
            }

            (View::Quiz, TuiEvent::CursorUp | TuiEvent::CursorDown) => {
                let options = module.map_or(0, |m| m.quiz.options.len());
                let down = matches!(event, TuiEvent::CursorDown);
                self.option_cursor = step_selection(self.option_cursor, options, down);
                None
            }
            (View::Quiz, TuiEvent::InputChar(c)) if c.is_ascii_digit() => {
                let answer = c.to_digit(10)?.checked_sub(1)? as usize;
                if answer >= module.map_or(0, |m| m.quiz.options.len()) {
                    return None;
                }
                self.option_cursor = answer;
                Some(LessonEvent::ChooseAnswer(answer))
            }
            (View::Quiz, TuiEvent::InputChar(' ')) => {
                Some(LessonEvent::ChooseAnswer(self.option_cursor))
            }
            // First Enter picks the highlighted option, the second submits it
            (View::Quiz, TuiEvent::Submit) => {
                if navigator.selected_answer() == Some(self.option_cursor) {
                    Some(LessonEvent::Submit)
                } else {
                    Some(LessonEvent::ChooseAnswer(self.option_cursor))
                }
            }

            (View::LessonList | View::LessonDetail | View::Quiz, TuiEvent::Escape | TuiEvent::Backspace) => {
                Some(LessonEvent::Back)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the lessons tab.
pub struct LessonsScreen<'a> {
    state: &'a mut LessonsScreenState,
    navigator: &'a Navigator,
    curriculum: &'a Curriculum,
    ledger: &'a CompletionLedger,
}

impl<'a> LessonsScreen<'a> {
    pub fn new(
        state: &'a mut LessonsScreenState,
        navigator: &'a Navigator,
        curriculum: &'a Curriculum,
        ledger: &'a CompletionLedger,
    ) -> Self {
        Self {
            state,
            navigator,
            curriculum,
            ledger,
        }
    }

    fn module(&self) -> Option<&'a Module> {
        let id = self.navigator.current_module()?;
        self.curriculum.get_module(id).ok()
    }

    fn render_module_grid(&mut self, frame: &mut Frame, area: Rect) {
        let [header, grid] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "📚 Learn",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "  Master your finances, one lesson at a time",
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .block(Block::new().padding(Padding::horizontal(1))),
            header,
        );

        let modules = self.curriculum.list_modules();
        self.state.module_cursor = self.state.module_cursor.min(modules.len().saturating_sub(1));

        let rows = modules.len().div_ceil(GRID_COLUMNS);
        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows]).split(grid);
        for (row, chunk) in modules.chunks(GRID_COLUMNS).enumerate() {
            let Some(row_area) = row_areas.get(row) else {
                break;
            };
            let cells =
                Layout::horizontal(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                    .split(*row_area);
            for (col, module) in chunk.iter().enumerate() {
                let index = row * GRID_COLUMNS + col;
                self.render_module_card(frame, cells[col], module, index == self.state.module_cursor);
            }
        }
    }

    fn render_module_card(&self, frame: &mut Frame, area: Rect, module: &Module, selected: bool) {
        let progress = self.ledger.progress(module);
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(format!(" {} {} ", module.icon, module.name));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [summary, gauge] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);
        let quiz = if progress.quiz_passed {
            Span::styled("  ✓ Quiz passed", Style::default().fg(Color::Green))
        } else {
            Span::styled("  Quiz pending", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(format!(
                    " {}/{} lessons",
                    progress.lessons_done, progress.lessons_total
                )),
                quiz,
            ])),
            summary,
        );

        let ratio = if progress.lessons_total == 0 {
            0.0
        } else {
            progress.lessons_done as f64 / progress.lessons_total as f64
        };
        let color = if progress.is_finished() {
            Color::Green
        } else {
            Color::Yellow
        };
        frame.render_widget(
            LineGauge::default()
                .ratio(ratio)
                .filled_style(Style::default().fg(color))
                .label(""),
            gauge,
        );
    }

    fn render_lesson_list(&mut self, frame: &mut Frame, area: Rect, module: &Module) {
        let rows = module.lesson_count() + 1;
        self.state.lesson_cursor = self.state.lesson_cursor.min(rows - 1);
        self.state.list_state.select(Some(self.state.lesson_cursor));

        // borders + marker + number
        let preview_width = area.width.saturating_sub(8) as usize;
        let mut items: Vec<ListItem> = module
            .lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                let done = self.ledger.is_lesson_complete(&module.id, i);
                let (marker, marker_style) = if done {
                    ("✓", Style::default().fg(Color::Green))
                } else {
                    ("○", Style::default().fg(Color::DarkGray))
                };
                let title_style = if i == self.state.lesson_cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!(" {marker} "), marker_style),
                        Span::styled(format!("{}. {}", i + 1, lesson.title), title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", preview(&lesson.content, preview_width)),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let quiz_passed = self.ledger.is_quiz_complete(&module.id);
        let quiz_style = if self.state.lesson_cursor == module.lesson_count() {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Magenta)
        };
        let mut quiz_line = vec![Span::styled(" 🧠 Take the quiz", quiz_style)];
        if quiz_passed {
            quiz_line.push(Span::styled("  ✓ Passed", Style::default().fg(Color::Green)));
        }
        items.push(ListItem::new(vec![Line::default(), Line::from(quiz_line)]));

        let list = List::new(items).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} {} ", module.icon, module.name))
                .title_bottom(Line::from(" ↑↓ Move  Enter Open  Esc Back ").centered()),
        );
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }

    fn render_lesson_detail(&mut self, frame: &mut Frame, area: Rect, module: &Module, index: usize) {
        let Some(lesson) = module.lesson(index) else {
            return;
        };

        let position = (module.id.clone(), index);
        if self.state.reading.as_ref() != Some(&position) {
            self.state.scroll_state.scroll_to_top();
            self.state.reading = Some(position);
        }

        let [header, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let mut title = vec![
            Span::styled(
                format!(" Lesson {} of {}  ", index + 1, module.lesson_count()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                lesson.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if self.ledger.is_lesson_complete(&module.id, index) {
            title.push(Span::styled("  ✓ Completed", Style::default().fg(Color::Green)));
        }
        frame.render_widget(Paragraph::new(Line::from(title)), header);

        // Leave a column for the scrollbar
        let content_width = body.width.saturating_sub(1).max(1);
        let paragraph = Paragraph::new(markdown::render(&lesson.content, Color::Gray, Color::Yellow))
            .wrap(Wrap { trim: false });
        let content_height = paragraph.line_count(content_width).max(1) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));
        frame.render_stateful_widget(scroll_view, body, &mut self.state.scroll_state);

        let has_previous = index > 0;
        let has_next = index + 1 < module.lesson_count();
        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
        let footer_line = Line::from(vec![
            Span::styled(" ← Previous", if has_previous { enabled } else { disabled }),
            Span::raw("   "),
            Span::styled("Enter Mark done", Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled("Next →", if has_next { enabled } else { disabled }),
            Span::styled("   Esc Back", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(footer_line), footer);
    }

    fn render_quiz(&mut self, frame: &mut Frame, area: Rect, module: &Module) {
        let Some(attempt) = self.navigator.quiz_attempt() else {
            return;
        };
        let quiz = &module.quiz;
        self.state.option_cursor = self
            .state
            .option_cursor
            .min(quiz.options.len().saturating_sub(1));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(" 🧠 {} Quiz ", module.name))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [question, options, banner, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(quiz.options.len() as u16 + 1),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(quiz.question.as_str())
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true }),
            question,
        );

        let outcome = attempt.outcome(quiz);
        let lines: Vec<Line> = quiz
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let chosen = attempt.selected == Some(i);
                let radio = if chosen { "(•)" } else { "( )" };
                let mut style = match outcome {
                    Some(_) if quiz.is_correct(i) => Style::default().fg(Color::Green),
                    Some(false) if chosen => Style::default().fg(Color::Red),
                    _ if chosen => Style::default().fg(Color::Yellow),
                    _ => Style::default().fg(Color::Gray),
                };
                if outcome.is_none() && i == self.state.option_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(Span::styled(format!("{radio} {}. {option}", i + 1), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), options);

        let banner_line = match outcome {
            Some(true) => Line::from(Span::styled(
                "🎉 Correct! Quiz passed.",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Some(false) => {
                let answer = quiz
                    .options
                    .get(quiz.correct_index)
                    .map(String::as_str)
                    .unwrap_or_default();
                Line::from(Span::styled(
                    format!("❌ Not quite. The correct answer is: {answer}"),
                    Style::default().fg(Color::Red),
                ))
            }
            None => Line::default(),
        };
        frame.render_widget(Paragraph::new(banner_line).wrap(Wrap { trim: true }), banner);

        let help_text = if outcome.is_some() {
            "Esc Back to lessons"
        } else {
            "↑↓ Move  1-9 Pick  Enter Select, then Submit  Esc Back"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(help_text, Style::default().fg(Color::DarkGray))),
            help,
        );
    }
}

impl Component for LessonsScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match (self.navigator.view(), self.module()) {
            (View::LessonList, Some(module)) => self.render_lesson_list(frame, area, module),
            (View::LessonDetail, Some(module)) => {
                let index = self.navigator.current_lesson_index().unwrap_or_default();
                self.render_lesson_detail(frame, area, module, index)
            }
            (View::Quiz, Some(module)) => self.render_quiz(frame, area, module),
            _ => self.render_module_grid(frame, area),
        }
    }
}

/// First line of a lesson's text, cut to `width` columns.
fn preview(content: &str, width: usize) -> String {
    if width < 2 {
        return String::new();
    }
    let text = markdown::plain_text(content);
    let options = textwrap::Options::new(width - 1).break_words(true);
    let mut lines = textwrap::wrap(&text, options).into_iter();
    match (lines.next(), lines.next()) {
        (Some(first), Some(_)) => format!("{first}…"),
        (Some(first), None) => first.into_owned(),
        (None, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::CompletionKey;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    struct Fixture {
        state: LessonsScreenState,
        navigator: Navigator,
        curriculum: Curriculum,
        ledger: CompletionLedger,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                state: LessonsScreenState::new(),
                navigator: Navigator::new(),
                curriculum: Curriculum::builtin().unwrap(),
                ledger: CompletionLedger::new(),
            }
        }

        /// Feed a key the way the app loop does: translate, then apply.
        fn press(&mut self, event: TuiEvent) -> Option<LessonEvent> {
            let lesson_event = self
                .state
                .handle_event(&event, &self.navigator, &self.curriculum)?;
            self.navigator
                .apply(lesson_event.clone(), &self.curriculum, &mut self.ledger)
                .unwrap();
            Some(lesson_event)
        }

        fn render_buffer(&mut self) -> Buffer {
            let backend = TestBackend::new(80, 30);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|f| {
                    LessonsScreen::new(
                        &mut self.state,
                        &self.navigator,
                        &self.curriculum,
                        &self.ledger,
                    )
                    .render(f, f.area())
                })
                .unwrap();
            terminal.backend().buffer().clone()
        }

        fn render_text(&mut self) -> String {
            let buffer = self.render_buffer();
            buffer.content().iter().map(|c| c.symbol()).collect()
        }

        fn render_lines(&mut self) -> Vec<String> {
            let buffer = self.render_buffer();
            let area = buffer.area;
            (area.top()..area.bottom())
                .map(|y| {
                    (area.left()..area.right())
                        .map(|x| buffer[(x, y)].symbol())
                        .collect()
                })
                .collect()
        }

        /// Module grid to the budgeting quiz.
        fn open_budgeting_quiz(&mut self) {
            self.press(TuiEvent::CursorRight);
            self.press(TuiEvent::Submit);
            self.state.lesson_cursor = 99;
            self.press(TuiEvent::CursorDown); // clamps onto the quiz row
            self.press(TuiEvent::Submit);
        }
    }

    #[test]
    fn test_grid_cursor_moves_by_rows_and_columns() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::CursorDown);
        assert_eq!(fx.state.module_cursor, 2);
        fx.press(TuiEvent::CursorRight);
        assert_eq!(fx.state.module_cursor, 3);
        fx.press(TuiEvent::CursorDown);
        assert_eq!(fx.state.module_cursor, 4);
        fx.press(TuiEvent::CursorUp);
        assert_eq!(fx.state.module_cursor, 2);
    }

    #[test]
    fn test_enter_on_card_selects_module() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::CursorRight);
        assert_eq!(
            fx.press(TuiEvent::Submit),
            Some(LessonEvent::SelectModule("budgeting".into()))
        );
        assert_eq!(fx.navigator.view(), View::LessonList);
    }

    #[test]
    fn test_quiz_row_follows_lessons() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::Submit);
        let lessons = fx.curriculum.get_module("basics").unwrap().lesson_count();
        for _ in 0..lessons + 3 {
            fx.press(TuiEvent::CursorDown);
        }
        assert_eq!(fx.state.lesson_cursor, lessons);
        assert_eq!(fx.press(TuiEvent::Submit), Some(LessonEvent::SelectQuiz));
        assert_eq!(fx.navigator.view(), View::Quiz);
    }

    #[test]
    fn test_reader_keys() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::Submit);
        fx.press(TuiEvent::Submit);
        assert_eq!(fx.navigator.view(), View::LessonDetail);

        assert_eq!(fx.press(TuiEvent::InputChar('n')), Some(LessonEvent::Next));
        assert_eq!(fx.navigator.current_lesson_index(), Some(1));
        assert_eq!(fx.press(TuiEvent::CursorLeft), Some(LessonEvent::Previous));
        assert_eq!(fx.press(TuiEvent::Submit), Some(LessonEvent::MarkDone));
        assert!(fx.ledger.is_lesson_complete("basics", 0));
        assert_eq!(fx.press(TuiEvent::Escape), Some(LessonEvent::Back));
        assert_eq!(fx.navigator.view(), View::LessonList);
    }

    #[test]
    fn test_quiz_enter_selects_then_submits() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::CursorRight);
        fx.press(TuiEvent::Submit); // budgeting
        let quiz_row = fx.curriculum.get_module("budgeting").unwrap().lesson_count();
        fx.state.lesson_cursor = quiz_row;
        fx.press(TuiEvent::Submit);

        fx.press(TuiEvent::CursorDown);
        assert_eq!(fx.press(TuiEvent::Submit), Some(LessonEvent::ChooseAnswer(1)));
        assert_eq!(fx.press(TuiEvent::Submit), Some(LessonEvent::Submit));
        assert!(fx.navigator.result_revealed());
        assert!(fx.ledger.is_quiz_complete("budgeting"));
    }

    #[test]
    fn test_quiz_digit_picks_option() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::Submit);
        fx.state.lesson_cursor = 99;
        fx.press(TuiEvent::CursorDown); // clamps onto the quiz row
        fx.press(TuiEvent::Submit);

        assert_eq!(
            fx.press(TuiEvent::InputChar('3')),
            Some(LessonEvent::ChooseAnswer(2))
        );
        assert_eq!(fx.navigator.selected_answer(), Some(2));
        assert_eq!(fx.press(TuiEvent::InputChar('0')), None);
    }

    #[test]
    fn test_grid_shows_progress() {
        let mut fx = Fixture::new();
        fx.ledger.mark_complete(CompletionKey::lesson("basics", 0));
        fx.ledger.mark_complete(CompletionKey::quiz("basics"));
        let text = fx.render_text();
        assert!(text.contains("Basics"));
        assert!(text.contains("1/3 lessons"));
        assert!(text.contains("Quiz passed"));
        assert!(text.contains("Credit & Loans"));
    }

    #[test]
    fn test_reader_renders_content_and_position() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::Submit);
        fx.press(TuiEvent::Submit);
        let text = fx.render_text();
        assert!(text.contains("Lesson 1 of 3"));
        assert!(text.contains("What Is Personal Finance?"));
        assert!(text.contains("Money in, money out"));
    }

    #[test]
    fn test_wrong_answer_banner_names_correct_option() {
        let mut fx = Fixture::new();
        fx.open_budgeting_quiz();
        fx.press(TuiEvent::InputChar('3'));
        fx.press(TuiEvent::Submit);

        let text = fx.render_text();
        assert!(text.contains("Not quite"));
        assert!(text.contains("30%"));
        assert!(!fx.ledger.is_quiz_complete("budgeting"));
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short", 20), "short");
        let long = preview("one two three four five six", 10);
        assert!(long.ends_with('…'));
        assert!(long.chars().count() <= 10);
        assert_eq!(preview("anything", 1), "");
    }

    #[test]
    fn test_lesson_list_marks_done_lessons() {
        let mut fx = Fixture::new();
        fx.press(TuiEvent::CursorRight);
        fx.press(TuiEvent::Submit); // budgeting
        fx.press(TuiEvent::Submit); // lesson 1
        fx.press(TuiEvent::InputChar('d'));
        fx.press(TuiEvent::Escape);
        assert_eq!(fx.navigator.view(), View::LessonList);

        let module = fx.curriculum.get_module("budgeting").unwrap();
        let first = format!("1. {}", module.lessons[0].title);
        let second = format!("2. {}", module.lessons[1].title);
        let lines = fx.render_lines();
        let row = |label: &str| {
            lines
                .iter()
                .find(|line| line.contains(label))
                .cloned()
                .unwrap_or_default()
        };

        let first_row = row(&first);
        assert!(first_row.contains('✓'), "{first_row}");
        let second_row = row(&second);
        assert!(second_row.contains('○'), "{second_row}");
        assert!(!second_row.contains('✓'));
    }

    #[test]
    fn test_quiz_digit_past_options_is_dropped() {
        let mut fx = Fixture::new();
        fx.open_budgeting_quiz();
        let options = fx.curriculum.get_module("budgeting").unwrap().quiz.options.len();
        assert_eq!(options, 4);

        fx.press(TuiEvent::InputChar('2'));
        assert_eq!(fx.state.option_cursor, 1);
        assert_eq!(fx.press(TuiEvent::InputChar('5')), None);
        assert_eq!(fx.press(TuiEvent::InputChar('9')), None);
        assert_eq!(fx.state.option_cursor, 1);
        assert_eq!(fx.navigator.selected_answer(), Some(1));

        assert_eq!(fx.press(TuiEvent::InputChar('4')), Some(LessonEvent::ChooseAnswer(3)));
        assert_eq!(fx.state.option_cursor, 3);
    }
}
