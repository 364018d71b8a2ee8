//! # Editor pane
//!
//! Edits the selected document in place. The pane keeps its own copy of the
//! text plus a cursor; every change is reported as
//! `EditorEvent::Changed(full_text)` for the reducer to store.
//!
//! `sync` is called each frame with the selection from `App`. Switching
//! files reloads the buffer and resets the cursor.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::highlight::{highlight, syntax_name};
use crate::tui::palette::Palette;
use crate::tui::text_edit::{
    line_and_column, line_end, line_start, move_vertically, next_char_boundary, offset_at_column,
    prev_char_boundary,
};

pub const NO_SELECTION: &str = "Select a file to edit";
pub const EMPTY_DOCUMENT: &str = "Write your code here...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Changed(String),
}

#[derive(Debug, Default)]
pub struct EditorState {
    key: Option<String>,
    pub buffer: String,
    cursor: usize,
    /// First visible line.
    scroll: usize,
    /// Bring the cursor into view on the next render. Set by edits and
    /// cursor moves; wheel scrolling leaves it alone.
    follow: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Follows the selection. `content` is the stored text of `key`.
    pub fn sync(&mut self, key: Option<&str>, content: Option<&str>) {
        if self.key.as_deref() != key {
            self.key = key.map(str::to_string);
            self.buffer = content.unwrap_or_default().to_string();
            self.cursor = 0;
            self.scroll = 0;
            self.follow = false;
        } else if let Some(content) = content
            && content != self.buffer
        {
            self.buffer = content.to_string();
            self.cursor = self.cursor.min(self.buffer.len());
            while !self.buffer.is_char_boundary(self.cursor) {
                self.cursor -= 1;
            }
        }
    }

    fn insert(&mut self, text: &str) -> Option<EditorEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.changed()
    }

    fn changed(&self) -> Option<EditorEvent> {
        Some(EditorEvent::Changed(self.buffer.clone()))
    }

    /// Places the cursor at a text position (line, display column), clamped
    /// to the document.
    pub fn place_cursor(&mut self, line: usize, column: usize) {
        let mut start = 0;
        for _ in 0..line {
            match self.buffer[start..].find('\n') {
                Some(i) => start += i + 1,
                None => break,
            }
        }
        let end = line_end(&self.buffer, start);
        self.cursor = start + offset_at_column(&self.buffer[start..end], column);
        self.follow = true;
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn last_line(&self) -> usize {
        self.buffer.matches('\n').count()
    }

    /// Settles `scroll` for a pane `height` lines tall.
    fn update_scroll(&mut self, height: usize) {
        self.scroll = self.scroll.min(self.last_line());
        if !std::mem::take(&mut self.follow) {
            return;
        }
        let (line, _) = line_and_column(&self.buffer, self.cursor);
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }
}

impl EventHandler for EditorState {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditorEvent> {
        self.key.as_ref()?;
        if !matches!(event, TuiEvent::ScrollUp(..) | TuiEvent::ScrollDown(..)) {
            self.follow = true;
        }
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Submit => self.insert("\n"),
            TuiEvent::Paste(text) => self.insert(&text.replace("\r\n", "\n")),
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorUp => {
                self.cursor = move_vertically(&self.buffer, self.cursor, -1).unwrap_or(0);
                None
            }
            TuiEvent::CursorDown => {
                self.cursor =
                    move_vertically(&self.buffer, self.cursor, 1).unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = line_start(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = line_end(&self.buffer, self.cursor);
                None
            }
            TuiEvent::ScrollUp(..) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown(..) => {
                self.scroll = (self.scroll + 1).min(self.last_line());
                None
            }
            _ => None,
        }
    }
}

/// Width of the line-number gutter for a document of `lines` lines.
pub fn gutter_width(lines: usize) -> u16 {
    lines.to_string().len().max(3) as u16 + 1
}

/// Transient render wrapper.
pub struct Editor<'a> {
    pub state: &'a mut EditorState,
    pub focused: bool,
}

impl Component for Editor<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let title = match self.state.key() {
            Some(key) => format!(" {key} · {} ", syntax_name(key)),
            None => String::from(" Editor "),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(self.focused))
            .title(Span::styled(title, palette.title(self.focused)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(key) = self.state.key.clone() else {
            let placeholder = Paragraph::new(NO_SELECTION)
                .style(palette.muted())
                .alignment(Alignment::Center);
            let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
            frame.render_widget(placeholder, middle);
            return;
        };

        self.state.update_scroll(inner.height as usize);
        let lines = highlight(&self.state.buffer, &key, palette.syntax_theme, palette.fg);
        let gutter = gutter_width(lines.len());
        let number_style = Style::default().fg(palette.fg_muted);

        let visible: Vec<Line> = if self.state.buffer.is_empty() {
            vec![Line::from(vec![
                Span::styled(format!("{:>w$} ", 1, w = gutter as usize - 1), number_style),
                Span::styled(EMPTY_DOCUMENT, palette.muted()),
            ])]
        } else {
            lines
                .into_iter()
                .enumerate()
                .skip(self.state.scroll)
                .take(inner.height as usize)
                .map(|(i, line)| {
                    let mut spans = vec![Span::styled(
                        format!("{:>w$} ", i + 1, w = gutter as usize - 1),
                        number_style,
                    )];
                    spans.extend(line.spans);
                    Line::from(spans)
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(visible).style(Style::default().bg(palette.bg)), inner);

        if self.focused {
            let (line, column) = line_and_column(&self.state.buffer, self.state.cursor);
            let x = inner.x as usize + gutter as usize + column;
            // Hidden when the wheel has scrolled it out of view
            if let Some(row) = line.checked_sub(self.state.scroll)
                && row < inner.height as usize
                && x < (inner.x + inner.width) as usize
            {
                frame.set_cursor_position((x as u16, inner.y + row as u16));
            }
        }
    }
}
