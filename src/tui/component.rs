use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields or constructor
/// arguments), may borrow persistent state owned by `TuiState`, and render
/// into a `Rect` of the frame.
///
/// `render` takes `&mut self` so a component can update presentation state
/// while drawing, e.g. clamping a list cursor or remembering a scroll offset.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns terminal events into its own high-level events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
