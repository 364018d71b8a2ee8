//! # TitleBar Component
//!
//! Top status line: app name, the current status message, replies in flight
//! and the active theme. Purely presentational; all fields are props.
//!
//! ```text
//!  aise | Editing src/index.js                 ⋯ 1 pending  theme: dark
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct TitleBar {
    pub status_message: String,
    pub pending_replies: usize,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(status_message: String, pending_replies: usize, theme: Theme) -> Self {
        Self {
            status_message,
            pending_replies,
            theme,
        }
    }

    fn right_text(&self) -> String {
        if self.pending_replies > 0 {
            format!("⋯ {} pending  theme: {} ", self.pending_replies, self.theme.label())
        } else {
            format!("theme: {} ", self.theme.label())
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let bar_style = Style::default().fg(palette.fg).bg(palette.bg_alt);
        let right = self.right_text();
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right.chars().count() as u16)])
                .areas(area);

        let mut spans = vec![Span::styled(
            " aise",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", palette.muted()));
            spans.push(Span::raw(self.status_message.clone()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), left_area);
        frame.render_widget(
            Paragraph::new(right).style(bar_style.fg(palette.fg_muted)).right_aligned(),
            right_area,
        );
    }
}
