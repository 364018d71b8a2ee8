use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};

use crate::core::chat::{ChatTurn, Role};
use crate::tui::palette::Palette;
use crate::tui::text_edit::display_width;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Borders plus padding on both sides.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top and bottom border.
const VERTICAL_OVERHEAD: usize = 2;
/// Share of the transcript width a bubble may take, in percent.
const MAX_BUBBLE_PERCENT: u16 = 85;

/// A single chat turn drawn as a bubble: user turns hug the right edge,
/// assistant turns the left.
///
/// Transient: built each frame from a borrowed turn. A bubble taller than
/// its area is drawn from row `skip` down, so the transcript can show any
/// slice of it.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
    pub palette: &'a Palette,
    pub skip: usize,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn, palette: &'a Palette) -> Self {
        Self { turn, palette, skip: 0 }
    }

    /// Hides the first `rows` rows of the bubble.
    pub fn skip(mut self, rows: usize) -> Self {
        self.skip = rows;
        self
    }

    fn wrap_options<'t>(width: usize) -> textwrap::Options<'t> {
        textwrap::Options::new(width)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
    }

    /// Width of the bubble for `turn` inside a transcript `available` wide.
    pub fn bubble_width(turn: &ChatTurn, available: u16) -> u16 {
        let max = (available as u32 * MAX_BUBBLE_PERCENT as u32 / 100) as u16;
        let max = max.max(HORIZONTAL_OVERHEAD + 1).min(available);
        let longest = turn
            .content
            .trim()
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0)
            .max(turn_title(turn.role).len());
        (longest as u16)
            .saturating_add(HORIZONTAL_OVERHEAD)
            .min(max)
    }

    /// Text lines of the bubble at `width`, or `None` when no text fits.
    fn wrapped(turn: &ChatTurn, width: u16) -> Option<Vec<Cow<'_, str>>> {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return None;
        }
        let content = turn.content.trim();
        if content.is_empty() {
            return Some(Vec::new());
        }
        Some(textwrap::wrap(content, Self::wrap_options(content_width as usize)))
    }

    /// Rendered height at `width`. The same wrapping is used to draw, so the
    /// transcript can be laid out before anything is drawn.
    pub fn calculate_height(turn: &ChatTurn, width: u16) -> usize {
        match Self::wrapped(turn, width) {
            Some(lines) => lines.len() + VERTICAL_OVERHEAD,
            None => 1,
        }
    }

    /// Where the bubble sits in a row of the transcript.
    pub fn placement(turn: &ChatTurn, row: Rect) -> Rect {
        let width = Self::bubble_width(turn, row.width);
        let x = match turn.role {
            Role::User => row.x + row.width.saturating_sub(width),
            Role::Assistant => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }
}

fn turn_title(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Message::placement(self.turn, area);
        let Some(lines) = Message::wrapped(self.turn, area.width) else {
            return;
        };
        // Row 0 is the top border, rows 1..=n the text, row n + 1 the bottom border
        let total = lines.len() + VERTICAL_OVERHEAD;
        let first = self.skip.min(total);
        let end = first.saturating_add(area.height as usize).min(total);
        if first == end {
            return;
        }

        let (accent, alignment) = match self.turn.role {
            Role::User => (self.palette.user, Alignment::Right),
            Role::Assistant => (self.palette.assistant, Alignment::Left),
        };
        let mut borders = Borders::LEFT | Borders::RIGHT;
        if first == 0 {
            borders |= Borders::TOP;
        }
        if end == total {
            borders |= Borders::BOTTOM;
        }
        let mut block = Block::default()
            .borders(borders)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if first == 0 {
            block = block
                .title(turn_title(self.turn.role))
                .title_alignment(alignment)
                .title_style(Style::default().fg(self.palette.fg_muted));
        }

        let text_start = first.max(1) - 1;
        let text_end = end.min(lines.len() + 1).saturating_sub(1).max(text_start);
        let text: Vec<Line> = lines[text_start..text_end]
            .iter()
            .map(|line| Line::raw(line.as_ref()))
            .collect();

        let area = Rect {
            height: (end - first) as u16,
            ..area
        };
        Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(self.palette.fg))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;

    fn turn(role: Role, content: &str) -> ChatTurn {
        ChatTurn {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_single_line_height_includes_borders() {
        assert_eq!(Message::calculate_height(&turn(Role::User, "hello"), 30), 3);
    }

    #[test]
    fn test_long_text_wraps() {
        let t = turn(Role::Assistant, "one two three four five six");
        // 10 wide → 6 columns of text
        assert!(Message::calculate_height(&t, 10) > 3);
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(Message::calculate_height(&turn(Role::User, "x"), 3), 1);
    }

    #[test]
    fn test_user_bubble_hugs_right_edge() {
        let row = Rect::new(0, 0, 40, 3);
        let user = Message::placement(&turn(Role::User, "hi"), row);
        let assistant = Message::placement(&turn(Role::Assistant, "hi"), row);
        assert_eq!(user.x + user.width, 40);
        assert_eq!(assistant.x, 0);
    }

    #[test]
    fn test_bubble_width_is_capped() {
        let long = turn(Role::Assistant, &"x".repeat(200));
        assert_eq!(Message::bubble_width(&long, 40), 34);
    }

    fn render_rows(t: &ChatTurn, skip: usize, height: u16) -> Vec<String> {
        let palette = Palette::for_theme(Theme::Dark);
        let area = Rect::new(0, 0, 20, height);
        let mut buf = Buffer::empty(area);
        Message::new(t, &palette).skip(skip).render(area, &mut buf);
        (0..height)
            .map(|y| (0..20).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_skipped_rows_show_middle_of_bubble() {
        let t = turn(Role::Assistant, "l1\nl2\nl3\nl4\nl5");
        assert_eq!(Message::calculate_height(&t, 20), 7);
        let rows = render_rows(&t, 2, 3);
        assert!(rows[0].starts_with("│ l2"));
        assert!(rows[2].starts_with("│ l4"));
        assert!(!rows.iter().any(|r| r.contains("assistant") || r.contains('╭') || r.contains('╰')));
    }

    #[test]
    fn test_tail_of_bubble_has_bottom_border() {
        let t = turn(Role::Assistant, "l1\nl2\nl3\nl4\nl5");
        let rows = render_rows(&t, 5, 2);
        assert!(rows[0].starts_with("│ l5"));
        assert!(rows[1].starts_with('╰'));
    }

    #[test]
    fn test_height_beyond_u16() {
        let t = turn(Role::User, &"x\n".repeat(70_000));
        assert_eq!(Message::calculate_height(&t, 30), 70_002);
    }

    #[test]
    fn test_render_shows_text() {
        let palette = Palette::for_theme(Theme::Dark);
        let t = turn(Role::User, "hello");
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        Message::new(&t, &palette).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("hello"));
        assert!(text.contains("you"));
    }
}
