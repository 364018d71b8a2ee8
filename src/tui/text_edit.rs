//! Pure text helpers shared by the editor and the chat input.
//!
//! Positions are byte offsets into the buffer and always sit on a char
//! boundary. Columns are display columns (`unicode-width`, tabs count as
//! [`TAB_WIDTH`]).

use unicode_width::UnicodeWidthChar;

pub const TAB_WIDTH: usize = 4;

/// Byte offset of the char before `pos`, or 0.
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the char after `pos`, or `text.len()`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

pub fn char_width(c: char) -> usize {
    if c == '\t' {
        TAB_WIDTH
    } else {
        c.width().unwrap_or(0)
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Start of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// End of the line containing `pos` (the `\n` itself, or `text.len()`).
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len())
}

/// Zero-based (line, display column) of `pos`.
pub fn line_and_column(text: &str, pos: usize) -> (usize, usize) {
    let line = text[..pos].matches('\n').count();
    let column = display_width(&text[line_start(text, pos)..pos]);
    (line, column)
}

/// Byte offset within `line` closest to `column` without passing it.
pub fn offset_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (i, c) in line.char_indices() {
        let w = char_width(c);
        if width + w > column {
            return i;
        }
        width += w;
    }
    line.len()
}

/// Moves `pos` one line up (`-1`) or down (`1`), keeping the display column
/// where possible. `None` at the first/last line.
pub fn move_vertically(text: &str, pos: usize, direction: i8) -> Option<usize> {
    let (_, column) = line_and_column(text, pos);
    let start = line_start(text, pos);
    let target_start = if direction < 0 {
        if start == 0 {
            return None;
        }
        line_start(text, start - 1)
    } else {
        let end = line_end(text, pos);
        if end == text.len() {
            return None;
        }
        end + 1
    };
    let target_end = line_end(text, target_start);
    Some(target_start + offset_at_column(&text[target_start..target_end], column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_multibyte() {
        let text = "aé😀b";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 7);
        assert_eq!(prev_char_boundary(text, 7), 3);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("\tx"), 5);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_line_and_column() {
        let text = "one\ntwo\n\tthree";
        assert_eq!(line_and_column(text, 0), (0, 0));
        assert_eq!(line_and_column(text, 6), (1, 2));
        assert_eq!(line_and_column(text, 8), (2, 0));
        assert_eq!(line_and_column(text, 9), (2, 4));
    }

    #[test]
    fn test_move_vertically_keeps_column() {
        let text = "abcdef\nxy\nlonger line";
        // from col 5 on line 0 down to short line → clamps to its end
        let down = move_vertically(text, 5, 1).unwrap();
        assert_eq!(down, 9);
        // then down again → col 2 of line 2
        assert_eq!(move_vertically(text, down, 1), Some(12));
        assert_eq!(move_vertically(text, 12, 1), None);
        assert_eq!(move_vertically(text, 2, -1), None);
        assert_eq!(move_vertically(text, 12, -1), Some(9));
    }

    #[test]
    fn test_offset_at_column_wide_chars() {
        assert_eq!(offset_at_column("日本語", 3), 3);
        assert_eq!(offset_at_column("日本語", 4), 6);
        assert_eq!(offset_at_column("ab", 10), 2);
    }
}
