use ratatui::Frame;
use ratatui::layout::Rect;

use super::palette::Palette;

/// A pane of the IDE.
///
/// Components receive what they show as props (struct fields or borrowed
/// state) and paint themselves into the `Rect` they are given. `render`
/// takes `&mut self` so components can update presentation state while
/// drawing, such as scroll offsets or the row cache used for hit testing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
