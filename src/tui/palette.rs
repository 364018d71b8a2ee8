//! Colors for each [`Theme`].

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub bg_alt: Color,
    pub fg: Color,
    pub fg_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub selection: Color,
    pub user: Color,
    pub assistant: Color,
    pub terminal_bg: Color,
    pub terminal_fg: Color,
    /// Name of the bundled syntect theme used by the editor.
    pub syntax_theme: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(30, 30, 30),
                bg_alt: Color::Rgb(40, 40, 40),
                fg: Color::Rgb(220, 220, 220),
                fg_muted: Color::Rgb(128, 128, 128),
                border: Color::Rgb(70, 70, 70),
                accent: Color::Rgb(0, 122, 204),
                selection: Color::Rgb(38, 79, 120),
                user: Color::Rgb(0, 122, 204),
                assistant: Color::Rgb(62, 62, 62),
                terminal_bg: Color::Black,
                terminal_fg: Color::Rgb(78, 201, 176),
                syntax_theme: "base16-ocean.dark",
            },
            Theme::Light => Self {
                bg: Color::Rgb(255, 255, 255),
                bg_alt: Color::Rgb(243, 243, 243),
                fg: Color::Rgb(30, 30, 30),
                fg_muted: Color::Rgb(110, 110, 110),
                border: Color::Rgb(200, 200, 200),
                accent: Color::Rgb(0, 95, 184),
                selection: Color::Rgb(204, 228, 247),
                user: Color::Rgb(0, 95, 184),
                assistant: Color::Rgb(229, 229, 229),
                terminal_bg: Color::Rgb(30, 30, 30),
                terminal_fg: Color::Rgb(22, 198, 12),
                syntax_theme: "InspiredGitHub",
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    /// Border style for a pane, brighter when it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title(&self, focused: bool) -> Style {
        let style = self.border(focused);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
