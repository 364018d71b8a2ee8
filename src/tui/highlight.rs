//! Syntax highlighting for the editor pane.
//!
//! The syntax is picked from the document key's extension; unknown
//! extensions and unknown themes fall back to plain text in `fallback_fg`.

use std::path::Path;
use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::text_edit::TAB_WIDTH;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

fn syntax_for(key: &str) -> Option<&'static SyntaxReference> {
    let ext = Path::new(key).extension()?.to_str()?;
    SYNTAX_SET.find_syntax_by_extension(ext)
}

/// Name of the syntax used for `key`, "Plain Text" when none matches.
pub fn syntax_name(key: &str) -> &'static str {
    syntax_for(key).map(|s| s.name.as_str()).unwrap_or("Plain Text")
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// One `Line` per line of `content`, including a trailing empty line when
/// the text ends with a newline.
pub fn highlight(content: &str, key: &str, theme_name: &str, fallback_fg: Color) -> Vec<Line<'static>> {
    let plain = |line: &str| Line::from(Span::styled(expand_tabs(line), Style::default().fg(fallback_fg)));

    let (Some(syntax), Some(theme)) = (syntax_for(key), THEME_SET.themes.get(theme_name)) else {
        return content.split('\n').map(plain).collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    content
        .split('\n')
        .map(|line| {
            let with_newline = format!("{line}\n");
            match highlighter.highlight_line(&with_newline, &SYNTAX_SET) {
                Ok(ranges) => {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(style, fragment)| {
                            let text = expand_tabs(fragment.trim_end_matches('\n'));
                            if text.is_empty() {
                                return None;
                            }
                            let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                            Some(Span::styled(text, Style::default().fg(fg)))
                        })
                        .collect();
                    Line::from(spans)
                }
                Err(e) => {
                    log::warn!("Highlighting {} failed: {}", key, e);
                    plain(line)
                }
            }
        })
        .collect()
}
