//! # File tree pane
//!
//! Lists the visible rows of the forest: expanded folders show their
//! children indented one level deeper. A keyboard cursor moves over the
//! rows; Enter or Space clicks the row under it, Delete removes it.
//!
//! `FileTreeState` keeps the ids of the rows drawn last frame so mouse
//! clicks and key presses resolve to nodes without walking the forest again.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::tree::{Forest, NodeId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeEvent {
    Click(NodeId),
    Delete(NodeId),
}

#[derive(Debug, Default)]
pub struct FileTreeState {
    pub cursor: usize,
    pub list_state: ListState,
    row_ids: Vec<NodeId>,
}

impl FileTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refreshes the row cache from `forest` and keeps the cursor in range.
    pub fn sync(&mut self, forest: &Forest) {
        self.row_ids = forest.visible_rows().iter().map(|r| r.node.id).collect();
        self.cursor = self.cursor.min(self.row_ids.len().saturating_sub(1));
        self.list_state.select(if self.row_ids.is_empty() { None } else { Some(self.cursor) });
    }

    pub fn row_ids(&self) -> &[NodeId] {
        &self.row_ids
    }

    /// First row index drawn at the top of the pane.
    pub fn offset(&self) -> usize {
        self.list_state.offset()
    }

    /// Mouse click on visible row `index`.
    pub fn click_row(&mut self, index: usize) -> Option<FileTreeEvent> {
        let id = *self.row_ids.get(index)?;
        self.cursor = index;
        self.list_state.select(Some(index));
        Some(FileTreeEvent::Click(id))
    }

    fn cursor_id(&self) -> Option<NodeId> {
        self.row_ids.get(self.cursor).copied()
    }
}

impl EventHandler for FileTreeState {
    type Event = FileTreeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FileTreeEvent> {
        match event {
            // The list keeps the cursor row in view, so the wheel moves the cursor
            TuiEvent::CursorUp | TuiEvent::ScrollUp(..) => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown(..) => {
                if self.cursor + 1 < self.row_ids.len() {
                    self.cursor += 1;
                }
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                self.list_state.select(Some(0));
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.row_ids.len().saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.cursor_id().map(FileTreeEvent::Click),
            TuiEvent::Delete => self.cursor_id().map(FileTreeEvent::Delete),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct FileTree<'a> {
    pub state: &'a mut FileTreeState,
    pub forest: &'a Forest,
    pub selected: Option<NodeId>,
    pub focused: bool,
}

impl Component for FileTree<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        self.state.sync(self.forest);
        let rows = self.forest.visible_rows();

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let node = row.node;
                let icon = match (node.is_folder(), node.is_expanded()) {
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                    (false, _) => "  ",
                };
                let mut style = Style::default().fg(palette.fg);
                if node.is_folder() {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if Some(node.id) == self.selected {
                    style = style.bg(palette.selection);
                }
                ListItem::new(Line::from(vec![
                    Span::raw(INDENT.repeat(row.depth)),
                    Span::styled(icon, palette.muted()),
                    Span::styled(node.name.clone(), style),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(self.focused))
            .title(Span::styled(" Files ", palette.title(self.focused)));

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
