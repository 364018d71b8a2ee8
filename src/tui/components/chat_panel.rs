//! # Chat transcript
//!
//! Scrollable list of chat turns. Follows the persistent state + transient
//! wrapper pattern: `ChatPanelState` lives in `TuiState`, `ChatPanel` is
//! built each frame with the turns borrowed from `App`.
//!
//! The view sticks to the bottom until the user scrolls up, and sticks again
//! once they scroll back down to the end or a new turn arrives.
//!
//! Row positions are plain `usize` offsets into the whole transcript; only
//! the bubbles overlapping the viewport are drawn, so the log can grow
//! without bound.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::message::Message;
use crate::core::chat::ChatTurn;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows between two bubbles.
const GAP: usize = 1;

pub struct ChatPanelState {
    /// Transcript row shown at the top of the viewport.
    offset: usize,
    pub stick_to_bottom: bool,
    seen_turns: usize,
    content_height: usize,
    viewport_height: usize,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            stick_to_bottom: true,
            seen_turns: 0,
            content_height: 0,
            viewport_height: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

impl EventHandler for ChatPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp(..) => {
                self.stick_to_bottom = false;
                self.offset = self.offset.saturating_sub(1);
            }
            TuiEvent::ScrollDown(..) => {
                self.offset = (self.offset + 1).min(self.max_scroll());
                if self.offset >= self.max_scroll() {
                    self.stick_to_bottom = true;
                }
            }
            _ => {}
        }
        None
    }
}

pub struct ChatPanel<'a> {
    pub state: &'a mut ChatPanelState,
    pub turns: &'a [ChatTurn],
    pub pending_replies: usize,
    pub focused: bool,
}

impl Component for ChatPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(palette.border(self.focused))
            .title(Span::styled(" AI Assistant ", palette.title(self.focused)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.turns.is_empty() && self.pending_replies == 0 {
            let hint = Paragraph::new("Ask the assistant about your code.")
                .style(palette.muted())
                .centered();
            frame.render_widget(hint, inner);
            return;
        }

        if self.turns.len() > self.state.seen_turns {
            self.state.stick_to_bottom = true;
            self.state.seen_turns = self.turns.len();
        }

        // Leave a column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let heights: Vec<usize> = self
            .turns
            .iter()
            .map(|turn| Message::calculate_height(turn, Message::bubble_width(turn, content_width)))
            .collect();
        let thinking_rows = usize::from(self.pending_replies > 0);
        let total = heights.iter().map(|h| h + GAP).sum::<usize>() + thinking_rows;
        self.state.content_height = total;
        self.state.viewport_height = inner.height as usize;
        self.state.offset = if self.state.stick_to_bottom {
            self.state.max_scroll()
        } else {
            self.state.offset.min(self.state.max_scroll())
        };

        let top = self.state.offset;
        let bottom = top + inner.height as usize;
        // Viewport row of a transcript row inside [top, bottom)
        let screen_row = |y: usize| inner.y + (y - top) as u16;

        let mut y = 0usize;
        for (turn, &height) in self.turns.iter().zip(&heights) {
            if y >= bottom {
                break;
            }
            let end = y + height;
            if end > top {
                let first = y.max(top);
                let rows = (end.min(bottom) - first) as u16;
                let area = Rect::new(inner.x, screen_row(first), content_width, rows);
                frame.render_widget(Message::new(turn, palette).skip(first - y), area);
            }
            y = end + GAP;
        }
        if self.pending_replies > 0 && (top..bottom).contains(&y) {
            let label = if self.pending_replies == 1 {
                String::from("Assistant is typing...")
            } else {
                format!("Assistant is typing... ({} replies pending)", self.pending_replies)
            };
            let line = Paragraph::new(Span::styled(label, palette.muted().add_modifier(Modifier::ITALIC)));
            frame.render_widget(line, Rect::new(inner.x, screen_row(y), content_width, 1));
        }

        if total > inner.height as usize {
            let mut scrollbar = ScrollbarState::new(self.state.max_scroll())
                .position(top)
                .viewport_content_length(inner.height as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                inner,
                &mut scrollbar,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::Role;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(turns: &[ChatTurn], pending: usize, state: &mut ChatPanelState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let palette = Palette::for_theme(Theme::Dark);
        terminal
            .draw(|f| {
                ChatPanel {
                    state,
                    turns,
                    pending_replies: pending,
                    focused: true,
                }
                .render(f, f.area(), &palette);
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_empty_transcript_shows_hint() {
        let text = render(&[], 0, &mut ChatPanelState::new());
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Ask the assistant"));
    }

    #[test]
    fn test_turns_and_typing_indicator() {
        let turns = vec![ChatTurn {
            role: Role::User,
            content: "hello".to_string(),
        }];
        let text = render(&turns, 1, &mut ChatPanelState::new());
        assert!(text.contains("hello"));
        assert!(text.contains("Assistant is typing..."));
    }

    #[test]
    fn test_scroll_up_releases_bottom() {
        let mut state = ChatPanelState::new();
        state.handle_event(&TuiEvent::ScrollUp(0, 0));
        assert!(!state.stick_to_bottom);
    }

    fn long_log(pairs: usize) -> Vec<ChatTurn> {
        (0..pairs)
            .flat_map(|i| {
                [
                    ChatTurn {
                        role: Role::User,
                        content: format!("question {i}"),
                    },
                    ChatTurn {
                        role: Role::Assistant,
                        content: format!("answer {i}"),
                    },
                ]
            })
            .collect()
    }

    #[test]
    fn test_huge_transcript_shows_latest_turn() {
        let turns = long_log(10_000);
        let mut state = ChatPanelState::new();
        let text = render(&turns, 1, &mut state);
        assert!(state.content_height() > u16::MAX as usize);
        assert!(text.contains("answer 9999"));
        assert!(text.contains("Assistant is typing..."));
        assert!(!text.contains("question 0 "));
    }

    #[test]
    fn test_huge_transcript_scrolls_back() {
        let turns = long_log(10_000);
        let mut state = ChatPanelState::new();
        render(&turns, 0, &mut state);
        let bottom = state.offset();
        for _ in 0..4 {
            state.handle_event(&TuiEvent::ScrollUp(0, 0));
        }
        render(&turns, 0, &mut state);
        assert!(!state.stick_to_bottom);
        assert_eq!(state.offset(), bottom - 4);
    }

    #[test]
    fn test_single_turn_taller_than_u16() {
        let turns = vec![ChatTurn {
            role: Role::User,
            content: format!("{}end", "line\n".repeat(70_000)),
        }];
        let mut state = ChatPanelState::new();
        let text = render(&turns, 0, &mut state);
        assert!(state.content_height() > 70_000);
        assert!(text.contains("end"));
        assert!(text.contains('╰'));
    }

    #[test]
    fn test_new_turn_sticks_to_bottom_again() {
        let mut state = ChatPanelState::new();
        state.stick_to_bottom = false;
        let turns = vec![ChatTurn {
            role: Role::Assistant,
            content: "hi".to_string(),
        }];
        render(&turns, 0, &mut state);
        assert!(state.stick_to_bottom);
    }
}
