//! # Bottom bar
//!
//! ```text
//! ─────────────────═══─────────────────   resize handle (drag it)
//!  Terminal │ Console        F5 run ...   tab header
//! $ node src/index.js                      active tab output
//! > Code execution simulated
//! ```
//!
//! The handle and the tab header are one row each; the output takes the
//! rest of the panel height.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::panel::BottomTab;
use crate::core::run::RunOutput;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const DIVIDER: &str = "│";
const HINTS: &str = "F5 run  F6 tab  Ctrl+T theme  Ctrl+N new ";
const GRIP: &str = "═══";

/// Horizontal extent of each tab label in the header, relative to its left edge.
fn tab_extents() -> impl Iterator<Item = (BottomTab, u16, u16)> {
    let mut x = 0u16;
    BottomTab::ALL.into_iter().map(move |tab| {
        let width = tab.label().len() as u16 + 2;
        let start = x;
        x += width + DIVIDER.chars().count() as u16;
        (tab, start, width)
    })
}

/// Tab under column `col` of a header drawn in `area`.
pub fn tab_at(col: u16, area: Rect) -> Option<BottomTab> {
    let rel = col.checked_sub(area.x)?;
    tab_extents()
        .find(|(_, start, width)| rel >= *start && rel < start + width)
        .map(|(tab, _, _)| tab)
}

pub struct BottomBar<'a> {
    pub output: &'a RunOutput,
    pub tab: BottomTab,
    pub resizing: bool,
}

impl BottomBar<'_> {
    fn render_handle(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let style = if self.resizing {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.border)
        };
        let grip = GRIP.chars().count() as u16;
        let side = area.width.saturating_sub(grip) / 2;
        let rest = area.width.saturating_sub(side + grip);
        let line = Line::from(vec![
            Span::styled("─".repeat(side as usize), style),
            Span::styled(GRIP, style),
            Span::styled("─".repeat(rest as usize), style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let mut spans = Vec::new();
        for (i, (tab, _, _)) in tab_extents().enumerate() {
            if i > 0 {
                spans.push(Span::styled(DIVIDER, palette.muted()));
            }
            let style = if tab == self.tab {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                palette.muted()
            };
            spans.push(Span::styled(format!(" {} ", tab.label()), style));
        }
        let [tabs_area, hints_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(HINTS.len() as u16)]).areas(area);
        let bar = Style::default().bg(palette.bg_alt);
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), tabs_area);
        frame.render_widget(
            Paragraph::new(HINTS).style(bar.fg(palette.fg_muted)).right_aligned(),
            hints_area,
        );
    }

    fn render_output(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let (text, style) = match self.tab {
            BottomTab::Terminal => (
                self.output.terminal.as_str(),
                Style::default().fg(palette.terminal_fg).bg(palette.terminal_bg),
            ),
            BottomTab::Console => (self.output.console.as_str(), palette.base()),
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

/// Splits the bottom bar into handle, tab header and output rows.
pub fn split(area: Rect) -> [Rect; 3] {
    Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]).areas(area)
}

impl Component for BottomBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let [handle, tabs, output] = split(area);
        self.render_handle(frame, handle, palette);
        self.render_tabs(frame, tabs, palette);
        self.render_output(frame, output, palette);
    }
}
