//! Markdown → ratatui `Text` renderer for lesson content.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Handles headings, bold, italic, inline code,
//! code blocks, lists, blockquotes and links. Lines are not wrapped here;
//! the lesson reader wraps with `Paragraph::wrap`.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse lesson markdown into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color, accent: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg, accent);
    for event in Parser::new_ext(content, options()) {
        w.handle(event);
    }
    w.text
}

/// Markdown stripped to its words, whitespace collapsed.
///
/// Used for one-line lesson previews.
pub fn plain_text(content: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for event in Parser::new_ext(content, options()) {
        if let Event::Text(t) | Event::Code(t) = event {
            words.extend(t.split_whitespace().map(str::to_string));
        }
    }
    words.join(" ")
}

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    accent: Color,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`, code block `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    in_code_block: bool,
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color, accent: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            accent,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            in_code_block: false,
            link_url: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.push_span(Span::styled(c.to_string(), style));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                let style = heading_style(self.accent, level);
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(self.accent)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let s = format!("{indent}{n}. ");
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(self.accent)));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.line_prefixes.pop();
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        if self.in_code_block {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
    }
}

fn heading_style(accent: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(accent).add_modifier(Modifier::ITALIC),
    }
}
