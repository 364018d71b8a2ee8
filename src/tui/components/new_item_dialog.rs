//! # New item dialog
//!
//! Overlay opened with Ctrl+N for adding a file or folder at the top level
//! of the tree. Typing edits the name, Up/Down (or Left/Right) switch the
//! kind, Enter creates, Esc dismisses.
//!
//! Follows the persistent state + transient wrapper pattern:
//! `NewItemDialogState` lives in `TuiState` while the dialog is open and
//! `NewItemDialog` is created each frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::tree::ItemKind;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;
use crate::tui::text_edit::prev_char_boundary;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Create { name: String, kind: ItemKind },
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemDialogState {
    pub name: String,
    pub kind: ItemKind,
}

impl Default for NewItemDialogState {
    fn default() -> Self {
        Self::new()
    }
}

impl NewItemDialogState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            kind: ItemKind::File,
        }
    }
}

impl EventHandler for NewItemDialogState {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DialogEvent> {
        match event {
            TuiEvent::Escape => Some(DialogEvent::Dismiss),
            // The name goes through exactly as typed, empty included
            TuiEvent::Submit => Some(DialogEvent::Create {
                name: self.name.clone(),
                kind: self.kind,
            }),
            TuiEvent::InputChar('\n') => None,
            TuiEvent::InputChar(c) => {
                self.name.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.name.extend(text.chars().filter(|c| !c.is_control()));
                None
            }
            TuiEvent::Backspace => {
                let prev = prev_char_boundary(&self.name, self.name.len());
                self.name.truncate(prev);
                None
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::CursorLeft | TuiEvent::CursorRight => {
                self.kind = self.kind.other();
                None
            }
            _ => None,
        }
    }
}

/// `width` x `height` rect centered in `outer`, shrunk to fit.
pub fn centered(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - width) / 2,
        outer.y + (outer.height - height) / 2,
        width,
        height,
    )
}

pub struct NewItemDialog<'a> {
    pub state: &'a NewItemDialogState,
}

impl Component for NewItemDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let overlay = centered(WIDTH, HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent))
            .title(" New item ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Create  Esc Cancel ").centered())
            .padding(Padding::horizontal(1))
            .style(palette.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let kind_span = |kind: ItemKind| {
            let label = format!(" {} ", kind.label());
            if kind == self.state.kind {
                Span::styled(label, Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD))
            } else {
                Span::styled(label, palette.muted())
            }
        };
        let name = if self.state.name.is_empty() {
            Span::styled("Enter name", palette.muted())
        } else {
            Span::raw(self.state.name.clone())
        };
        let lines = vec![
            Line::from(vec![Span::styled("Name: ", palette.muted()), name]),
            Line::default(),
            Line::from(vec![
                Span::styled("Type: ", palette.muted()),
                kind_span(ItemKind::File),
                Span::raw(" "),
                kind_span(ItemKind::Folder),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        if inner.height > 0 {
            let x = inner.x + 6 + self.state.name.chars().count() as u16;
            if x < inner.x + inner.width {
                frame.set_cursor_position((x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut NewItemDialogState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_create_keeps_name_as_typed() {
        let mut state = NewItemDialogState::new();
        type_str(&mut state, " x ");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DialogEvent::Create {
                name: " x ".to_string(),
                kind: ItemKind::File
            })
        );
    }

    #[test]
    fn test_empty_name_still_creates() {
        let mut state = NewItemDialogState::new();
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DialogEvent::Create {
                name: String::new(),
                kind: ItemKind::Folder
            })
        );
    }

    #[test]
    fn test_arrows_switch_kind() {
        let mut state = NewItemDialogState::new();
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.kind, ItemKind::Folder);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.kind, ItemKind::File);
    }

    #[test]
    fn test_backspace_and_escape() {
        let mut state = NewItemDialogState::new();
        type_str(&mut state, "ab");
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.name, "a");
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(DialogEvent::Dismiss));
    }

    #[test]
    fn test_centered_shrinks_to_fit() {
        let r = centered(44, 7, Rect::new(0, 0, 20, 5));
        assert_eq!(r, Rect::new(0, 0, 20, 5));
        let r = centered(10, 2, Rect::new(0, 0, 20, 6));
        assert_eq!(r, Rect::new(5, 2, 10, 2));
    }

    #[test]
    fn test_render_shows_kinds() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        let state = NewItemDialogState {
            name: "notes.md".to_string(),
            kind: ItemKind::Folder,
        };
        terminal
            .draw(|f| NewItemDialog { state: &state }.render(f, f.area(), &palette))
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("New item"));
        assert!(text.contains("notes.md"));
        assert!(text.contains("File"));
        assert!(text.contains("Folder"));
    }
}
