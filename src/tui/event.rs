use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Always handled by the event loop
    ForceQuit, // Ctrl+C
    Resize,

    // Routed to the active screen
    Escape,
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    NextField, // Tab
    PrevField, // Shift+Tab
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    PageUp,
    PageDown,
    TogglePassword, // Ctrl+S on the login form
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    translate(event::read().ok()?)
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Some terminals also report releases; only presses count.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::TogglePassword),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
        (KeyModifiers::SHIFT, KeyCode::Tab) => Some(TuiEvent::PrevField),
        (_, KeyCode::Tab) => Some(TuiEvent::NextField),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_c_is_force_quit() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_plain_and_shifted_chars() {
        assert_eq!(
            translate(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('q'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('Q'))
        );
    }

    #[test]
    fn test_unbound_control_chords_are_dropped() {
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_tab_directions() {
        assert_eq!(
            translate(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(TuiEvent::NextField)
        );
        assert_eq!(
            translate(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(TuiEvent::PrevField)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
    }

    #[test]
    fn test_paste_and_resize() {
        assert_eq!(
            translate(Event::Paste("abc".into())),
            Some(TuiEvent::Paste("abc".into()))
        );
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
