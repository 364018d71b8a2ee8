use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global commands
    ForceQuit,
    RunCode,
    CycleTab,
    ToggleTheme,
    OpenNewItem,
    FocusNext,

    // Editing / navigation (routed to the focused pane)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Submit,
    Escape,
    Backspace,
    Delete,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Mouse
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),
    MouseMove(u16, u16),
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),

    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Maps a raw crossterm event to a `TuiEvent`. Unmapped events become `None`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Kitty protocol reports releases too; only presses and repeats count
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::ToggleTheme),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::OpenNewItem),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
                (_, KeyCode::F(5)) => Some(TuiEvent::RunCode),
                (_, KeyCode::F(6)) => Some(TuiEvent::CycleTab),
                (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
                // Unbound Ctrl/Alt chords are dropped, not typed
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => {
            let (col, row) = (mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::MouseDown(col, row)),
                MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::MouseDrag(col, row)),
                MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::MouseUp(col, row)),
                MouseEventKind::Moved => Some(TuiEvent::MouseMove(col, row)),
                MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp(col, row)),
                MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown(col, row)),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_global_shortcuts() {
        assert_eq!(translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(TuiEvent::ForceQuit));
        assert_eq!(translate(key(KeyCode::Char('t'), KeyModifiers::CONTROL)), Some(TuiEvent::ToggleTheme));
        assert_eq!(translate(key(KeyCode::F(5), KeyModifiers::NONE)), Some(TuiEvent::RunCode));
        assert_eq!(translate(key(KeyCode::Tab, KeyModifiers::NONE)), Some(TuiEvent::FocusNext));
    }

    #[test]
    fn test_plain_chars_are_input() {
        assert_eq!(translate(key(KeyCode::Char('t'), KeyModifiers::NONE)), Some(TuiEvent::InputChar('t')));
        assert_eq!(translate(key(KeyCode::Char('T'), KeyModifiers::SHIFT)), Some(TuiEvent::InputChar('T')));
    }

    #[test]
    fn test_unbound_chords_are_not_input() {
        assert_eq!(translate(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
    }

    #[test]
    fn test_mouse_events() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(TuiEvent::MouseDown(3, 4))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Left), 0, 9)),
            Some(TuiEvent::MouseUp(0, 9))
        );
        assert_eq!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 3, 4)), None);
    }
}
