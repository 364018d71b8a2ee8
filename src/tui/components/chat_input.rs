//! # Chat input
//!
//! One-line prompt box under the transcript. The buffer is internal state;
//! text wider than the box scrolls horizontally to keep the cursor visible.
//! Pasted newlines are flattened to spaces.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;
use crate::tui::text_edit::{display_width, next_char_boundary, offset_at_column, prev_char_boundary};

pub const PLACEHOLDER: &str = "Ask AI for help...";
/// Box height: one text row between two borders.
pub const HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ChatInputEvent {
    /// Enter on a non-blank buffer. The buffer is cleared.
    Submit(String),
}

#[derive(Debug, Default)]
pub struct ChatInput {
    pub buffer: String,
    cursor: usize,
    /// First visible display column.
    scroll: usize,
    /// Set by the parent each frame.
    pub focused: bool,
}

impl ChatInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Keeps the cursor column inside a viewport `width` columns wide.
    fn follow_cursor(&mut self, width: usize) {
        let column = display_width(&self.buffer[..self.cursor]);
        if column < self.scroll {
            self.scroll = column;
        } else if width > 0 && column >= self.scroll + width {
            self.scroll = column + 1 - width;
        }
    }

    fn visible_text(&self, width: usize) -> &str {
        let start = offset_at_column(&self.buffer, self.scroll);
        let end = start + offset_at_column(&self.buffer[start..], width);
        &self.buffer[start..end]
    }
}

impl EventHandler for ChatInput {
    type Event = ChatInputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ChatInputEvent> {
        match event {
            TuiEvent::InputChar('\n') => self.insert(" "),
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => {
                let flat: String = text
                    .replace("\r\n", " ")
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert(&flat);
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
            }
            TuiEvent::CursorLeft => self.cursor = prev_char_boundary(&self.buffer, self.cursor),
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
            }
            TuiEvent::CursorHome => self.cursor = 0,
            TuiEvent::CursorEnd => self.cursor = self.buffer.len(),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                self.cursor = 0;
                self.scroll = 0;
                return Some(ChatInputEvent::Submit(std::mem::take(&mut self.buffer)));
            }
            _ => {}
        }
        None
    }
}

impl Component for ChatInput {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(palette.border(self.focused));
        let inner = block.inner(area);
        let width = inner.width as usize;
        self.follow_cursor(width);

        let content = if self.buffer.is_empty() {
            Span::styled(PLACEHOLDER, palette.muted())
        } else {
            Span::styled(self.visible_text(width).to_string(), Style::default().fg(palette.fg))
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let column = display_width(&self.buffer[..self.cursor]) - self.scroll;
            frame.set_cursor_position((inner.x + column as u16, inner.y));
        }
    }
}
